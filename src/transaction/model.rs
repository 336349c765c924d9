use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A value transfer waiting in the pool or captured inside a block.
/// Nothing here is signed or checked against balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }

    /// JSON object with keys in sorted order, used as part of the block preimage.
    pub fn canonical_json(&self) -> Value {
        json!({
            "amount": self.amount,
            "receiver": self.receiver,
            "sender": self.sender,
        })
    }
}
