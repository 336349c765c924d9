use super::{Block, Chain, ProofOfWork};

/// Mine a fresh chain of `len` blocks (genesis included) at the default
/// difficulty. Every mined block carries one transaction.
pub fn mined_chain(len: usize) -> Vec<Block> {
    let pow = ProofOfWork::default();
    let mut chain = Chain::new();
    while chain.len() < len {
        let prev = chain.last_block().clone();
        chain.add_transaction("miner", format!("peer-{}", prev.index), 1.0);
        let proof = pow.solve(prev.proof);
        chain.create_block(proof, prev.compute_hash());
    }
    chain.blocks().to_vec()
}
