use std::collections::HashMap;

use super::{ChainSource, RemoteChain};
use crate::blockchain::Block;
use crate::error::LedgerError;

/// Peers answering from a fixed table; peers not in the table fail to respond.
pub struct StaticPeers {
    chains: HashMap<String, RemoteChain>,
}

impl StaticPeers {
    pub fn new(entries: Vec<(&str, Vec<Block>)>) -> Self {
        let chains = entries
            .into_iter()
            .map(|(peer, chain)| {
                let length = chain.len();
                (peer.to_string(), RemoteChain { chain, length })
            })
            .collect();
        Self { chains }
    }
}

impl ChainSource for StaticPeers {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, LedgerError> {
        self.chains
            .get(peer)
            .cloned()
            .ok_or_else(|| LedgerError::MalformedPeerResponse {
                peer: peer.to_string(),
                reason: "no such peer".into(),
            })
    }
}
