use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};

use crate::blockchain::{Block, Chain, ChainValidator, ProofOfWork};
use crate::config::NodeConfig;
use crate::error::LedgerError;
use crate::network::{ChainSource, ConsensusEngine, NodeRegistry};
use crate::transaction::Transaction;

/// Transaction appended to every block this node mines.
#[derive(Debug, Clone)]
pub struct MiningReward {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

/// The chain tip a proof is being searched against.
#[derive(Debug, Clone)]
struct Tip {
    index: u64,
    proof: u64,
    hash: String,
}

/// One ledger participant: the chain with its pending pool, the known
/// peers, and the puzzle settings used to mine and to validate.
///
/// The chain lock guards blocks and pool together and is only held for
/// structural updates. The registry has its own lock and the two are never
/// held at the same time.
#[derive(Debug)]
pub struct Node {
    chain: Mutex<Chain>,
    registry: Mutex<NodeRegistry>,
    pow: ProofOfWork,
    validator: ChainValidator,
    consensus: ConsensusEngine,
    reward: Option<MiningReward>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new(ProofOfWork::default())
    }
}

impl Node {
    pub fn new(pow: ProofOfWork) -> Self {
        let validator = ChainValidator::new(pow);
        Self {
            chain: Mutex::new(Chain::new()),
            registry: Mutex::new(NodeRegistry::new()),
            pow,
            validator,
            consensus: ConsensusEngine::new(validator),
            reward: None,
        }
    }

    /// Build a node from settings, registering any configured peers.
    pub fn from_config(config: &NodeConfig) -> Result<Self, LedgerError> {
        let mut node = Self::new(ProofOfWork::new(config.difficulty));
        if let Some(receiver) = &config.reward_receiver {
            node = node.with_reward(MiningReward {
                sender: config.node_address.clone(),
                receiver: receiver.clone(),
                amount: config.miner_reward,
            });
        }
        for peer in &config.peers {
            node.register_node(peer)?;
        }
        Ok(node)
    }

    pub fn with_reward(mut self, reward: MiningReward) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn difficulty(&self) -> usize {
        self.pow.difficulty()
    }

    fn lock_chain(&self) -> MutexGuard<'_, Chain> {
        // Every critical section leaves the chain consistent, so a panic
        // elsewhere does not invalidate it.
        self.chain.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_registry(&self) -> MutexGuard<'_, NodeRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Solve the puzzle for the current tip and append a block holding the
    /// pending pool. The search runs without the chain lock; if the tip
    /// moves meanwhile the search restarts from the new tip.
    pub fn mine_block(&self, data: Option<String>) -> Block {
        loop {
            let tip = self.tip();
            let proof = self.pow.solve(tip.proof);
            if let Some(block) = self.append_on(&tip, proof, data.as_deref()) {
                return block;
            }
        }
    }

    fn tip(&self) -> Tip {
        let chain = self.lock_chain();
        let last = chain.last_block();
        Tip {
            index: last.index,
            proof: last.proof,
            hash: last.compute_hash(),
        }
    }

    /// Append a block solved against `tip`, or `None` if the chain no longer
    /// ends at `tip`.
    fn append_on(&self, tip: &Tip, proof: u64, data: Option<&str>) -> Option<Block> {
        let mut chain = self.lock_chain();
        let last = chain.last_block();
        if last.index != tip.index || last.compute_hash() != tip.hash {
            debug!("MINER - tip moved from #{} while solving, retrying", tip.index);
            return None;
        }

        if let Some(reward) = &self.reward {
            chain.add_transaction(reward.sender.clone(), reward.receiver.clone(), reward.amount);
        }
        let previous_hash = tip.hash.clone();
        let block = match data {
            Some(data) => chain.create_block_with_data(proof, previous_hash, Some(data.to_string())),
            None => chain.create_block(proof, previous_hash),
        }
        .clone();
        info!(
            "MINER - mined block #{} proof={} txs={}",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Some(block)
    }

    /// Snapshot of the full chain.
    pub fn get_chain(&self) -> Vec<Block> {
        self.lock_chain().blocks().to_vec()
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.lock_chain().pending().to_vec()
    }

    pub fn validate_chain(&self, chain: &[Block]) -> bool {
        self.validator.is_valid(chain)
    }

    /// Validate a snapshot of the local chain outside the lock.
    pub fn validate_local(&self) -> (bool, usize) {
        let chain = self.get_chain();
        (self.validator.is_valid(&chain), chain.len())
    }

    pub fn add_transaction(
        &self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: f64,
    ) -> u64 {
        let index = self.lock_chain().add_transaction(sender, receiver, amount);
        debug!("POOL - queued transaction for block #{index}");
        index
    }

    pub fn register_node(&self, address: &str) -> Result<String, LedgerError> {
        self.lock_registry().add_node(address)
    }

    /// Register every address or none of them.
    pub fn register_nodes<S: AsRef<str>>(&self, addresses: &[S]) -> Result<Vec<String>, LedgerError> {
        let keys = self.lock_registry().add_nodes(addresses)?;
        if !keys.is_empty() {
            info!("NODES - registered {}", keys.join(", "));
        }
        Ok(keys)
    }

    pub fn nodes(&self) -> Vec<String> {
        self.lock_registry().snapshot()
    }

    /// Replace the local chain with the longest valid peer chain, if one is
    /// strictly longer. Returns whether a swap happened and the chain now held.
    pub async fn reconcile<S: ChainSource>(&self, source: &S) -> (bool, Vec<Block>) {
        let peers = self.nodes();
        let local_length = self.lock_chain().len();

        let Some(candidate) = self
            .consensus
            .longest_valid_chain(source, &peers, local_length)
            .await
        else {
            return (false, self.get_chain());
        };

        let mut chain = self.lock_chain();
        // Blocks may have been mined locally while peers were queried.
        if candidate.len() > chain.len() && chain.replace(candidate) {
            info!("CONSENSUS - chain replaced, new length {}", chain.len());
            (true, chain.blocks().to_vec())
        } else {
            debug!("CONSENSUS - local chain grew past the candidate, keeping it");
            (false, chain.blocks().to_vec())
        }
    }
}
