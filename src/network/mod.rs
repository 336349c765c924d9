pub mod client;
pub mod consensus;
pub mod registry;

#[cfg(test)]
pub mod test_utils;

pub use client::{ChainSource, HttpChainSource, RemoteChain};
pub use consensus::ConsensusEngine;
pub use registry::NodeRegistry;
