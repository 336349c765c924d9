use sha2::{Digest, Sha256};

use super::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// Proof-of-Work puzzle: find `n` such that SHA-256 of the decimal text of
/// `n^2 - previous_proof^2` starts with `difficulty` zero hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    /// Difficulties above [`MAX_DIFFICULTY`] are clamped to it.
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Brute-force search from 1 upwards. Blocks until a proof is found.
    pub fn solve(&self, previous_proof: u64) -> u64 {
        let mut candidate: u64 = 1;
        while !self.verify(previous_proof, candidate) {
            candidate += 1;
        }
        candidate
    }

    /// Check `proof` against `previous_proof` with the same rule `solve` uses.
    pub fn verify(&self, previous_proof: u64, proof: u64) -> bool {
        match puzzle_digest(previous_proof, proof) {
            Some(digest) => self.meets_difficulty(&digest),
            None => false,
        }
    }

    fn meets_difficulty(&self, digest: &str) -> bool {
        digest.len() >= self.difficulty && digest.bytes().take(self.difficulty).all(|c| c == b'0')
    }
}

/// Hex digest of the puzzle for a candidate, or `None` if `n^2 - p^2` overflows.
pub fn puzzle_digest(previous_proof: u64, proof: u64) -> Option<String> {
    let n = i128::from(proof);
    let p = i128::from(previous_proof);
    let delta = n.checked_mul(n)?.checked_sub(p.checked_mul(p)?)?;

    let mut hasher = Sha256::new();
    hasher.update(delta.to_string().as_bytes());
    Some(hex::encode(hasher.finalize()))
}
