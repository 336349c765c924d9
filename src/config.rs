use std::env;
use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// Runtime settings, read from the environment (a `.env` file is loaded first by `main`).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
    pub peer_timeout: Duration,
    /// Identity used as the sender of mining rewards.
    pub node_address: String,
    pub miner_reward: f64,
    /// No reward transaction is added while this is unset.
    pub reward_receiver: Option<String>,
    pub peers: Vec<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            difficulty: DEFAULT_DIFFICULTY,
            peer_timeout: Duration::from_secs(5),
            node_address: random_node_address(),
            miner_reward: 2.0,
            reward_receiver: None,
            peers: Vec::new(),
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            difficulty: parse_var(&lookup, "DIFFICULTY")
                .filter(|d| *d <= MAX_DIFFICULTY)
                .unwrap_or(defaults.difficulty),
            peer_timeout: parse_var(&lookup, "PEER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.peer_timeout),
            node_address: lookup("NODE_ADDRESS")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.node_address),
            miner_reward: parse_var(&lookup, "MINER_REWARD").unwrap_or(defaults.miner_reward),
            reward_receiver: lookup("MINER_REWARD_RECEIVER").filter(|v| !v.trim().is_empty()),
            peers: lookup("PEERS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn random_node_address() -> String {
    Uuid::new_v4().simple().to_string()
}
