use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::LedgerError;

/// Path every node serves its full chain on.
pub const CHAIN_PATH: &str = "/api/v1/chain/";

/// A peer's answer to "give me your chain".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Something that can hand back the chain held by a peer.
pub trait ChainSource {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<RemoteChain, LedgerError>>;
}

/// Fetches chains from peers over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpChainSource {
    client: Client,
    timeout: Duration,
}

impl HttpChainSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }
}

impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, LedgerError> {
        let url = format!("http://{peer}{CHAIN_PATH}");
        debug!("CONSENSUS - fetching {url}");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| LedgerError::PeerUnreachable {
                peer: peer.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::MalformedPeerResponse {
                peer: peer.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        response
            .json::<RemoteChain>()
            .await
            .map_err(|e| LedgerError::MalformedPeerResponse {
                peer: peer.to_string(),
                reason: e.to_string(),
            })
    }
}
