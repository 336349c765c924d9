use super::Block;
use crate::transaction::Transaction;

/// In-memory ledger: the block list plus the pool of transactions waiting
/// for the next block. Both are always mutated together by the owner of
/// the surrounding lock.
#[derive(Debug, Clone)]
pub struct Chain {
    blocks: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// Initialize a new chain holding only the genesis block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::genesis()],
            pending: Vec::new(),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        // The block list starts with genesis and only ever grows or is
        // swapped for another non-empty list.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Queue a transaction and return the index of the block expected to hold it.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: f64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, receiver, amount));
        self.next_index()
    }

    /// Seal the pending pool into a new block and append it.
    pub fn create_block(&mut self, proof: u64, previous_hash: String) -> &Block {
        self.create_block_with_data(proof, previous_hash, None)
    }

    pub fn create_block_with_data(
        &mut self,
        proof: u64,
        previous_hash: String,
        data: Option<String>,
    ) -> &Block {
        let transactions = std::mem::take(&mut self.pending);
        let block = Block::new(self.next_index(), proof, previous_hash, transactions, data);
        self.blocks.push(block);
        self.last_block()
    }

    /// Swap the whole block list. The pending pool is left untouched.
    /// Empty lists are refused so the chain always has a tip.
    pub fn replace(&mut self, blocks: Vec<Block>) -> bool {
        if blocks.is_empty() {
            return false;
        }
        self.blocks = blocks;
        true
    }

    fn next_index(&self) -> u64 {
        self.blocks.len() as u64 + 1
    }
}
