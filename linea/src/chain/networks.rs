//! Known Linea network identities.

use serde::Serialize;

/// Ecosystem name under which every network is registered.
pub const ECOSYSTEM_NAME: &str = "linea";

/// Name of the local development network.
pub const LOCAL_NETWORK_NAME: &str = "local";

/// Suffix appended to a live network name to form its fork variant.
pub const FORK_SUFFIX: &str = "-fork";

/// Chain ID reported by the in-process test provider.
pub const LOCAL_CHAIN_ID: u64 = 1337;

/// Immutable identity of a live network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkDescriptor {
    /// Network name, unique within the ecosystem.
    pub name: &'static str,
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// Network ID (`net_version`).
    pub network_id: u64,
}

/// Every live network the ecosystem knows about.
pub const NETWORKS: [NetworkDescriptor; 2] = [
    NetworkDescriptor {
        name: "goerli",
        chain_id: 59140,
        network_id: 59140,
    },
    NetworkDescriptor {
        name: "mainnet",
        chain_id: 59144,
        network_id: 59144,
    },
];

impl NetworkDescriptor {
    /// Looks up a live network by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Self> {
        NETWORKS.iter().find(|network| network.name == name)
    }

    /// Looks up a live network by chain ID.
    #[must_use]
    pub fn by_chain_id(chain_id: u64) -> Option<&'static Self> {
        NETWORKS.iter().find(|network| network.chain_id == chain_id)
    }

    /// Name of this network's fork variant (e.g. `mainnet-fork`).
    #[must_use]
    pub fn fork_name(&self) -> String {
        format!("{}{FORK_SUFFIX}", self.name)
    }
}

/// Splits `mainnet-fork` into its upstream descriptor. Returns `None` for
/// names that are not fork variants of a known network.
#[must_use]
pub fn fork_upstream(name: &str) -> Option<&'static NetworkDescriptor> {
    name.strip_suffix(FORK_SUFFIX)
        .and_then(NetworkDescriptor::by_name)
}

/// Chain ID a provider connected to `name` is expected to report.
#[must_use]
pub fn expected_chain_id(name: &str) -> Option<u64> {
    if name == LOCAL_NETWORK_NAME {
        return Some(LOCAL_CHAIN_ID);
    }
    NetworkDescriptor::by_name(name)
        .or_else(|| fork_upstream(name))
        .map(|network| network.chain_id)
}
