use std::collections::BTreeSet;

use url::Url;

use crate::error::LedgerError;

/// Known peers, keyed by canonical `host:port`.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    nodes: BTreeSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `address` and insert it. Returns the canonical key.
    pub fn add_node(&mut self, address: &str) -> Result<String, LedgerError> {
        let key = normalize_address(address)?;
        self.nodes.insert(key.clone());
        Ok(key)
    }

    /// All-or-nothing registration of a batch of addresses.
    pub fn add_nodes<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<Vec<String>, LedgerError> {
        let keys = addresses
            .iter()
            .map(|a| normalize_address(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes.extend(keys.iter().cloned());
        Ok(keys)
    }

    /// Owned copy of the keys, so callers can drop the registry lock before doing I/O.
    pub fn snapshot(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }
}

/// Reduce a peer address (`http://host:port/path`, `host:port`, ...) to `host:port`.
/// A missing port falls back to the scheme default.
pub fn normalize_address(address: &str) -> Result<String, LedgerError> {
    let trimmed = address.trim();
    let invalid = || LedgerError::InvalidNodeAddress(address.to_string());

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let port = url.port_or_known_default().ok_or_else(invalid)?;

    Ok(format!("{host}:{port}"))
}
