use actix_web::{HttpResponse, get, post, web};

use super::models::{AppState, ConnectNodesRequest, ConnectNodesResponse, NodesResponse};
use crate::error::LedgerError;

/// Register peers. Either all supplied addresses are accepted or none are.
#[post("/nodes/")]
pub async fn connect_nodes(
    state: web::Data<AppState>,
    body: web::Json<ConnectNodesRequest>,
) -> Result<HttpResponse, LedgerError> {
    let nodes = body.into_inner().nodes.ok_or(LedgerError::NoNodes)?;
    state.node.register_nodes(&nodes)?;

    Ok(HttpResponse::Created().json(ConnectNodesResponse {
        message: "All the nodes are now connected.".to_string(),
        nodes: state.node.nodes(),
    }))
}

#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(NodesResponse {
        nodes: state.node.nodes(),
    })
}
