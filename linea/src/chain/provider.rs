//! Provider bindings and the read-only provider snapshot used by the
//! normalizer.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::networks::expected_chain_id;
use crate::error::{Error, Result};

/// Block gas maximum assumed for the in-process test provider.
pub const DEFAULT_MAX_GAS: u64 = 30_000_000;

/// Provider implementation bound to a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Generic JSON-RPC node client.
    Node,
    /// In-process test chain.
    Test,
}

impl ProviderKind {
    /// Name the provider is registered and configured under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the currently connected provider.
///
/// The normalizer never reaches for ambient state; callers pass this in (or
/// `None` when nothing is connected).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderContext {
    /// Network the provider is connected to (e.g. `mainnet`, `local`).
    pub network: String,
    /// Chain ID the provider reports.
    pub chain_id: u64,
    /// Block gas maximum the provider reports.
    pub max_gas: u64,
}

impl ProviderContext {
    /// Creates a snapshot.
    pub fn new(network: impl Into<String>, chain_id: u64, max_gas: u64) -> Self {
        Self {
            network: network.into(),
            chain_id,
            max_gas,
        }
    }

    /// Snapshot for a known network, with the chain ID that network reports
    /// and `max_gas` (or [`DEFAULT_MAX_GAS`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the network is not known.
    pub fn for_network(network: &str, max_gas: Option<u64>) -> Result<Self> {
        let chain_id = expected_chain_id(network)
            .ok_or_else(|| Error::config(format!("unknown network '{network}'")))?;
        Ok(Self::new(
            network,
            chain_id,
            max_gas.unwrap_or(DEFAULT_MAX_GAS),
        ))
    }
}
