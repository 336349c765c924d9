pub mod block;
pub mod model;
pub mod pow;
pub mod validator;

#[cfg(test)]
pub mod test_utils;

pub use block::Block;
pub use model::Chain;
pub use pow::ProofOfWork;
pub use validator::ChainValidator;

/// Default Proof-of-Work difficulty (number of leading zero hex digits).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// A SHA-256 hex digest has 64 characters; no higher difficulty can be met.
pub const MAX_DIFFICULTY: usize = 64;
