use futures::future::join_all;
use log::{debug, info, warn};

use super::{ChainSource, RemoteChain};
use crate::blockchain::{Block, ChainValidator};
use crate::error::LedgerError;

/// Longest-valid-chain rule over the chains reported by peers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusEngine {
    validator: ChainValidator,
}

impl ConsensusEngine {
    pub fn new(validator: ChainValidator) -> Self {
        Self { validator }
    }

    /// Query every peer concurrently and return the winning chain, if any
    /// is strictly longer than `local_length` and valid.
    pub async fn longest_valid_chain<S: ChainSource>(
        &self,
        source: &S,
        peers: &[String],
        local_length: usize,
    ) -> Option<Vec<Block>> {
        let responses = join_all(peers.iter().map(|peer| source.fetch_chain(peer))).await;
        self.select(local_length, peers.iter().map(String::as_str).zip(responses))
    }

    /// Walk the responses in order keeping a running maximum. A candidate must
    /// be strictly longer than the best so far, so among equal lengths the
    /// first one seen wins. Failed or malformed responses are skipped.
    pub fn select<'a>(
        &self,
        local_length: usize,
        responses: impl IntoIterator<Item = (&'a str, Result<RemoteChain, LedgerError>)>,
    ) -> Option<Vec<Block>> {
        let mut best_length = local_length;
        let mut best_chain = None;

        for (peer, response) in responses {
            let remote = match response {
                Ok(remote) => remote,
                Err(e) => {
                    warn!("CONSENSUS - skipping {peer}: {e}");
                    continue;
                }
            };

            if remote.length != remote.chain.len() {
                warn!(
                    "CONSENSUS - skipping {peer}: reported length {} but sent {} blocks",
                    remote.length,
                    remote.chain.len()
                );
                continue;
            }

            if remote.length <= best_length {
                debug!(
                    "CONSENSUS - {peer} length {} does not beat {best_length}",
                    remote.length
                );
                continue;
            }

            if !self.validator.is_valid(&remote.chain) {
                warn!(
                    "CONSENSUS - rejecting invalid chain of length {} from {peer}",
                    remote.length
                );
                continue;
            }

            info!("CONSENSUS - {peer} offers valid chain of length {}", remote.length);
            best_length = remote.length;
            best_chain = Some(remote.chain);
        }

        best_chain
    }
}

#[cfg(test)]
mod tests {
    use super::ConsensusEngine;
    use crate::blockchain::Block;
    use crate::blockchain::test_utils::mined_chain;
    use crate::error::LedgerError;
    use crate::network::test_utils::StaticPeers;
    use crate::network::{ChainSource, HttpChainSource, RemoteChain};
    use std::time::Duration;

    fn tampered(len: usize) -> Vec<Block> {
        let mut chain = mined_chain(len);
        chain[2].transactions[0].amount = 1_000.0;
        chain
    }

    fn peers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[actix_web::test]
    async fn adopts_longest_valid_and_ignores_longer_invalid() {
        let longest = mined_chain(5);
        let source = StaticPeers::new(vec![
            ("a:1", mined_chain(2)),
            ("b:1", mined_chain(3)),
            ("c:1", longest.clone()),
            ("d:1", tampered(6)),
        ]);
        let engine = ConsensusEngine::default();

        let winner = engine
            .longest_valid_chain(&source, &peers(&["a:1", "b:1", "c:1", "d:1"]), 3)
            .await;

        assert_eq!(winner, Some(longest));
    }

    #[actix_web::test]
    async fn nothing_longer_means_no_winner() {
        let source = StaticPeers::new(vec![("a:1", mined_chain(2)), ("b:1", mined_chain(3))]);
        let engine = ConsensusEngine::default();

        let winner = engine
            .longest_valid_chain(&source, &peers(&["a:1", "b:1"]), 3)
            .await;

        assert!(winner.is_none());
    }

    #[actix_web::test]
    async fn unreachable_peers_are_skipped() {
        let longer = mined_chain(3);
        let source = StaticPeers::new(vec![("b:1", longer.clone())]);
        let engine = ConsensusEngine::default();

        let winner = engine
            .longest_valid_chain(&source, &peers(&["a:1", "b:1", "c:1"]), 1)
            .await;

        assert_eq!(winner, Some(longer));
    }

    #[test]
    fn first_of_equal_length_wins() {
        let first = mined_chain(4);
        let second = mined_chain(4);
        assert_ne!(first, second);
        let engine = ConsensusEngine::default();

        let winner = engine.select(
            2,
            vec![
                ("a:1", Ok(RemoteChain { length: 4, chain: first.clone() })),
                ("b:1", Ok(RemoteChain { length: 4, chain: second })),
            ],
        );

        assert_eq!(winner, Some(first));
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let chain = mined_chain(3);
        let engine = ConsensusEngine::default();

        let winner = engine.select(1, vec![("a:1", Ok(RemoteChain { length: 9, chain }))]);

        assert!(winner.is_none());
    }

    #[test]
    fn invalid_chain_never_wins_even_when_alone() {
        let engine = ConsensusEngine::default();
        let chain = tampered(4);
        let winner = engine.select(1, vec![("a:1", Ok(RemoteChain { length: 4, chain }))]);
        assert!(winner.is_none());
    }

    #[actix_web::test]
    async fn http_source_reports_unreachable_peer() {
        // Port 1 on loopback is not expected to accept connections.
        let source = HttpChainSource::new(Duration::from_millis(500));
        let result = source.fetch_chain("127.0.0.1:1").await;
        assert!(matches!(result, Err(LedgerError::PeerUnreachable { .. })));
    }
}
