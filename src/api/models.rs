use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::LedgerError;
use crate::network::HttpChainSource;
use crate::node::Node;
use crate::transaction::Transaction;

/// Shared application state: the node and the client used to reach its peers.
pub struct AppState {
    pub node: Node,
    pub peers: HttpChainSource,
}

impl AppState {
    pub fn new(node: Node, peers: HttpChainSource) -> Self {
        Self { node, peers }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Deserialize)]
pub struct MineQuery {
    pub data: Option<String>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    #[serde(flatten)]
    pub block: Block,
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ReplaceChainResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/* ---------- TX API Models ---------- */

/// Every field is optional so missing ones can be reported together.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<f64>,
}

impl NewTxRequest {
    pub fn into_parts(self) -> Result<(String, String, f64), LedgerError> {
        match (self.sender, self.receiver, self.amount) {
            (Some(sender), Some(receiver), Some(amount)) => Ok((sender, receiver, amount)),
            (sender, receiver, amount) => {
                let mut missing = Vec::new();
                if sender.is_none() {
                    missing.push("sender");
                }
                if receiver.is_none() {
                    missing.push("receiver");
                }
                if amount.is_none() {
                    missing.push("amount");
                }
                Err(LedgerError::MissingTransactionFields(missing))
            }
        }
    }
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct MempoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct ConnectNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ConnectNodesResponse {
    pub message: String,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
}
