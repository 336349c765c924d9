use actix_web::{HttpResponse, get, post, web};
use log::{info, warn};

use super::models::{
    AppState, MineQuery, MineResponse, ReplaceChainResponse, ValidateRequest, ValidateResponse,
};
use crate::error::LedgerError;
use crate::network::RemoteChain;

/// Get the full chain. Peers call this during reconciliation.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let chain = state.node.get_chain();
    HttpResponse::Ok().json(RemoteChain {
        length: chain.len(),
        chain,
    })
}

/// Validate the local chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    let (valid, length) = state.node.validate_local();
    if !valid {
        warn!("GET /validate/ - local chain failed validation");
    }
    HttpResponse::Ok().json(ValidateResponse { valid, length })
}

/// Validate a chain supplied by the caller.
#[post("/validate/")]
pub async fn validate_supplied_chain(
    state: web::Data<AppState>,
    body: web::Json<ValidateRequest>,
) -> HttpResponse {
    let chain = body.into_inner().chain;
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.node.validate_chain(&chain),
        length: chain.len(),
    })
}

/// Mine a block from the pending pool. The search runs on the blocking pool.
#[get("/mine_block/")]
pub async fn mine_block(
    state: web::Data<AppState>,
    query: web::Query<MineQuery>,
) -> Result<HttpResponse, LedgerError> {
    let data = query.into_inner().data;
    let worker = state.clone();
    let block = web::block(move || worker.node.mine_block(data))
        .await
        .map_err(|e| LedgerError::Mining(e.to_string()))?;

    Ok(HttpResponse::Ok().json(MineResponse {
        message: format!("Congrats, you mined block #{}", block.index),
        block,
    }))
}

/// Adopt the longest valid chain among registered peers.
#[get("/replace_chain/")]
pub async fn replace_chain(state: web::Data<AppState>) -> HttpResponse {
    let (replaced, chain) = state.node.reconcile(&state.peers).await;
    let message = if replaced {
        info!("GET /replace_chain/ - replaced by a chain of length {}", chain.len());
        "The chain was replaced by the longest one."
    } else {
        "The existing chain is the longest one."
    };
    HttpResponse::Ok().json(ReplaceChainResponse {
        message: message.to_string(),
        replaced,
        chain,
    })
}
