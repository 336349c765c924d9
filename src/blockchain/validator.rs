use super::{Block, ProofOfWork};

/// Checks hash linkage and proof-of-work across a sequence of blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainValidator {
    pow: ProofOfWork,
}

impl ChainValidator {
    pub fn new(pow: ProofOfWork) -> Self {
        Self { pow }
    }

    /// A chain of zero or one block is valid. Otherwise every block must
    /// point at the digest of its predecessor and carry a proof that solves
    /// the puzzle seeded by the predecessor's proof.
    ///
    /// Linkage covers a block's content only through its successor, so
    /// content edits to the tip itself are not visible here.
    pub fn is_valid(&self, chain: &[Block]) -> bool {
        chain.windows(2).all(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            cur.previous_hash == prev.compute_hash() && self.pow.verify(prev.proof, cur.proof)
        })
    }
}
