use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

pub const GENESIS_PROOF: u64 = 1;
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A single block in the ledger. Blocks are never edited once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String, // creation instant, informational only
    pub proof: u64,
    pub previous_hash: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Block {
    /// The hard-coded first block of every chain.
    pub fn genesis() -> Self {
        Self::new(1, GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string(), Vec::new(), None)
    }

    /// Build a block stamped with the current UTC time.
    pub fn new(
        index: u64,
        proof: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
        data: Option<String>,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().to_rfc3339(),
            proof,
            previous_hash,
            transactions,
            data,
        }
    }

    /// Canonical JSON form: every object's keys sorted by name, `data` omitted when absent.
    pub fn canonical_json(&self) -> Value {
        // Inserted in key order so the result is sorted whichever map backs serde_json.
        let mut map = Map::new();
        if let Some(data) = &self.data {
            map.insert("data".into(), Value::String(data.clone()));
        }
        map.insert("index".into(), Value::from(self.index));
        map.insert(
            "previous_hash".into(),
            Value::String(self.previous_hash.clone()),
        );
        map.insert("proof".into(), Value::from(self.proof));
        map.insert("timestamp".into(), Value::String(self.timestamp.clone()));
        map.insert(
            "transactions".into(),
            Value::Array(
                self.transactions
                    .iter()
                    .map(Transaction::canonical_json)
                    .collect(),
            ),
        );
        Value::Object(map)
    }

    /// Lowercase hex SHA-256 of the canonical JSON encoding.
    pub fn compute_hash(&self) -> String {
        let preimage = self.canonical_json().to_string();
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    fn sample() -> Block {
        Block {
            index: 2,
            timestamp: "2024-05-01T10:00:00+00:00".into(),
            proof: 533,
            previous_hash: "abc".into(),
            transactions: vec![Transaction::new("alice", "bob", 3.5)],
            data: None,
        }
    }

    #[test]
    fn genesis_shape() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, 1);
        assert_eq!(b.previous_hash, "0");
        assert!(b.transactions.is_empty());
        assert_eq!(b.compute_hash().len(), 64);
    }

    #[test]
    fn digest_is_deterministic() {
        let b = sample();
        assert_eq!(b.compute_hash(), b.compute_hash());
        assert_eq!(b.compute_hash(), b.clone().compute_hash());
    }

    #[test]
    fn digest_ignores_field_order_of_the_source() {
        let a: Block = serde_json::from_str(
            r#"{"index":2,"timestamp":"2024-05-01T10:00:00+00:00","proof":533,
                "previous_hash":"abc",
                "transactions":[{"sender":"alice","receiver":"bob","amount":3.5}]}"#,
        )
        .unwrap();
        let b: Block = serde_json::from_str(
            r#"{"transactions":[{"amount":3.5,"receiver":"bob","sender":"alice"}],
                "previous_hash":"abc","proof":533,
                "timestamp":"2024-05-01T10:00:00+00:00","index":2}"#,
        )
        .unwrap();
        assert_eq!(a.compute_hash(), b.compute_hash());
        assert_eq!(a.compute_hash(), sample().compute_hash());
    }

    #[test]
    fn preimage_is_sorted_json() {
        let mut b = sample();
        b.data = Some("optional".into());
        let text = b.canonical_json().to_string();
        assert!(text.starts_with(r#"{"data":"optional","index":2,"previous_hash":"abc""#));
        assert!(text.ends_with(r#""amount":3.5,"receiver":"bob","sender":"alice"}]}"#));
    }

    #[test]
    fn every_field_feeds_the_digest() {
        let base = sample().compute_hash();

        let mut b = sample();
        b.index = 3;
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.timestamp.push('Z');
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.proof += 1;
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.previous_hash = "abd".into();
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.transactions[0].amount = 4.0;
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.data = Some(String::new());
        assert_ne!(base, b.compute_hash());
    }

    #[test]
    fn absent_data_is_omitted_on_the_wire() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("data").is_none());
        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
