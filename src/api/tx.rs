use actix_web::{HttpResponse, get, post, web};
use log::debug;

use super::models::{AppState, MempoolResponse, NewTxRequest, NewTxResponse};
use crate::error::LedgerError;

/// Submit a transaction into the pending pool.
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, LedgerError> {
    let (sender, receiver, amount) = body.into_inner().into_parts()?;
    debug!("POST /transactions/ - {sender} -> {receiver}: {amount}");

    let index = state.node.add_transaction(sender, receiver, amount);

    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to block {index}"),
        index,
    }))
}

/// List transactions waiting for the next block.
#[get("/transactions/")]
pub async fn get_mempool(state: web::Data<AppState>) -> HttpResponse {
    let transactions = state.node.pending_transactions();
    HttpResponse::Ok().json(MempoolResponse {
        size: transactions.len(),
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::time::Duration;

    use crate::api::{AppState, init_routes};
    use crate::network::HttpChainSource;
    use crate::node::Node;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(
            Node::default(),
            HttpChainSource::new(Duration::from_millis(500)),
        ))
    }

    #[actix_web::test]
    async fn accepted_transaction_promises_next_block() {
        let state = state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/")
            .set_json(json!({ "sender": "alice", "receiver": "bob", "amount": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["index"], 2);

        let req = test::TestRequest::get().uri("/api/v1/transactions/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 1);
        assert_eq!(body["transactions"][0]["sender"], "alice");
    }

    #[actix_web::test]
    async fn missing_fields_are_rejected_without_mutation() {
        let state = state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/")
            .set_json(json!({ "sender": "alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("receiver, amount"), "{text}");

        assert!(state.node.pending_transactions().is_empty());
    }
}
