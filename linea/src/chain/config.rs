//! Per-network configuration and its factory defaults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::networks::{FORK_SUFFIX, LOCAL_NETWORK_NAME, NETWORKS};
use crate::convert::{Numeric, convert};
use crate::error::{Error, Result};
use crate::transaction::TransactionType;

/// Confirmations required on a live network.
pub const DEFAULT_REQUIRED_CONFIRMATIONS: u64 = 1;

/// Block time of a live network, in seconds.
pub const DEFAULT_BLOCK_TIME: u64 = 2;

/// Provider used for live networks unless configured otherwise.
pub const DEFAULT_LIVE_PROVIDER: &str = "node";

/// Provider used for the local network.
pub const DEFAULT_LOCAL_PROVIDER: &str = "test";

/// Seconds to wait for a transaction to be accepted on a live network.
pub const DEFAULT_TRANSACTION_ACCEPTANCE_TIMEOUT: u64 = 120;

/// Seconds to wait for a transaction to be accepted on a local network.
pub const DEFAULT_LOCAL_TRANSACTION_ACCEPTANCE_TIMEOUT: u64 = 20;

/// Gas-limit policy applied when a transaction does not set one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasLimit {
    /// Leave unset for the provider to estimate.
    #[default]
    Auto,
    /// Use the connected provider's block gas maximum.
    Max,
    /// Use a fixed value.
    Fixed(u64),
}

impl fmt::Display for GasLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Max => f.write_str("max"),
            Self::Fixed(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for GasLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Max => serializer.serialize_str("max"),
            Self::Fixed(value) => serializer.serialize_u64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for GasLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = Numeric::deserialize(deserializer)?;
        if let Numeric::Text(text) = &raw {
            if text.eq_ignore_ascii_case("auto") {
                return Ok(Self::Auto);
            }
            if text.eq_ignore_ascii_case("max") {
                return Ok(Self::Max);
            }
        }
        convert::<u64>(&raw)
            .map(Self::Fixed)
            .map_err(D::Error::custom)
    }
}

/// Tunables for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Blocks to wait before a transaction counts as final.
    pub required_confirmations: u64,
    /// Expected seconds between blocks.
    pub block_time: u64,
    /// Envelope type used when a request does not pick one.
    pub default_transaction_type: TransactionType,
    /// Provider to connect with when none is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    /// Gas-limit policy.
    pub gas_limit: GasLimit,
    /// Seconds to wait for a transaction to be accepted.
    pub transaction_acceptance_timeout_secs: u64,
}

/// Keys a network table may carry.
pub(crate) const NETWORK_CONFIG_KEYS: [&str; 6] = [
    "required_confirmations",
    "block_time",
    "default_transaction_type",
    "default_provider",
    "gas_limit",
    "transaction_acceptance_timeout_secs",
];

/// Extra key accepted by fork tables.
pub(crate) const FORK_CONFIG_KEY: &str = "upstream_provider";

impl NetworkConfig {
    /// Acceptance timeout as a [`Duration`].
    #[must_use]
    pub const fn acceptance_timeout(&self) -> Duration {
        Duration::from_secs(self.transaction_acceptance_timeout_secs)
    }

    /// Whether this configuration satisfies the local/dev invariant.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        self.block_time == 0 && self.required_confirmations == 0
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        create_config(
            DEFAULT_REQUIRED_CONFIRMATIONS,
            DEFAULT_BLOCK_TIME,
            Some(DEFAULT_LIVE_PROVIDER),
        )
    }
}

/// Configuration of a fork variant: local tunables plus the provider the fork
/// replays state from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkedNetworkConfig {
    /// Local tunables.
    #[serde(flatten)]
    pub network: NetworkConfig,
    /// Provider used to fetch upstream state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_provider: Option<String>,
}

impl Default for ForkedNetworkConfig {
    fn default() -> Self {
        create_fork_config(None)
    }
}

/// Live-network factory: dynamic-fee by default, automatic gas limit.
#[must_use]
pub fn create_config(
    required_confirmations: u64,
    block_time: u64,
    default_provider: Option<&str>,
) -> NetworkConfig {
    NetworkConfig {
        required_confirmations,
        block_time,
        default_transaction_type: TransactionType::Dynamic,
        default_provider: default_provider.map(str::to_owned),
        gas_limit: GasLimit::Auto,
        transaction_acceptance_timeout_secs: DEFAULT_TRANSACTION_ACCEPTANCE_TIMEOUT,
    }
}

/// Local-network factory: instant blocks, no confirmations, maximum gas.
#[must_use]
pub fn create_local_config(default_provider: Option<&str>) -> NetworkConfig {
    NetworkConfig {
        gas_limit: GasLimit::Max,
        transaction_acceptance_timeout_secs: DEFAULT_LOCAL_TRANSACTION_ACCEPTANCE_TIMEOUT,
        ..create_config(0, 0, default_provider)
    }
}

/// Local-network factory wrapped as a fork variant.
#[must_use]
pub fn create_fork_config(upstream_provider: Option<&str>) -> ForkedNetworkConfig {
    ForkedNetworkConfig {
        network: create_local_config(None),
        upstream_provider: upstream_provider.map(str::to_owned),
    }
}

/// Ecosystem configuration keyed by network name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineaConfig {
    /// Linea mainnet.
    pub mainnet: NetworkConfig,
    /// Local fork of Linea mainnet.
    pub mainnet_fork: ForkedNetworkConfig,
    /// Linea Goerli testnet.
    pub goerli: NetworkConfig,
    /// Local fork of Linea Goerli.
    pub goerli_fork: ForkedNetworkConfig,
    /// In-process development network.
    pub local: NetworkConfig,
    /// Network used when none is selected.
    pub default_network: String,
}

impl Default for LineaConfig {
    fn default() -> Self {
        Self {
            mainnet: NetworkConfig::default(),
            mainnet_fork: ForkedNetworkConfig::default(),
            goerli: NetworkConfig::default(),
            goerli_fork: ForkedNetworkConfig::default(),
            local: create_local_config(Some(DEFAULT_LOCAL_PROVIDER)),
            default_network: LOCAL_NETWORK_NAME.to_owned(),
        }
    }
}

impl LineaConfig {
    /// Live network entry by name.
    #[must_use]
    pub fn live(&self, name: &str) -> Option<&NetworkConfig> {
        match name {
            "mainnet" => Some(&self.mainnet),
            "goerli" => Some(&self.goerli),
            _ => None,
        }
    }

    /// Fork entry by upstream network name.
    #[must_use]
    pub fn fork(&self, name: &str) -> Option<&ForkedNetworkConfig> {
        match name {
            "mainnet" => Some(&self.mainnet_fork),
            "goerli" => Some(&self.goerli_fork),
            _ => None,
        }
    }

    /// Configuration for a network name: a live name, `<name>-fork`
    /// (or `<name>_fork`), or `local`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the name matches no entry.
    pub fn get(&self, name: &str) -> Result<&NetworkConfig> {
        if name == LOCAL_NETWORK_NAME {
            return Ok(&self.local);
        }
        let upstream = name
            .strip_suffix(FORK_SUFFIX)
            .or_else(|| name.strip_suffix("_fork"));
        let entry = match upstream {
            Some(upstream) => self.fork(upstream).map(|fork| &fork.network),
            None => self.live(name),
        };
        entry.ok_or_else(|| Error::config(format!("no configuration for network '{name}'")))
    }

    /// Configuration of [`Self::default_network`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the default network is unknown.
    pub fn default_network_config(&self) -> Result<&NetworkConfig> {
        self.get(&self.default_network)
    }

    /// Every entry with its network name, live networks first, then forks,
    /// then `local`.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, &NetworkConfig)> {
        let live = NETWORKS
            .iter()
            .filter_map(|network| Some((network.name.to_owned(), self.live(network.name)?)));
        let forks = NETWORKS.iter().filter_map(|network| {
            Some((network.fork_name(), &self.fork(network.name)?.network))
        });
        live.chain(forks)
            .chain(std::iter::once((LOCAL_NETWORK_NAME.to_owned(), &self.local)))
            .collect()
    }

    /// Checks cross-field rules serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a local or fork entry has a non-zero block
    /// time or confirmation count, or the default network is unknown.
    pub fn validate(&self) -> Result<()> {
        for (name, network) in self.entries() {
            let is_local = name == LOCAL_NETWORK_NAME || name.ends_with(FORK_SUFFIX);
            if is_local && !network.is_instant() {
                return Err(Error::config(format!(
                    "network '{name}' must have block_time = 0 and required_confirmations = 0"
                )));
            }
        }
        self.default_network_config().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_live_defaults() {
        let config = LineaConfig::default();
        for name in ["mainnet", "goerli"] {
            let network = config.get(name).unwrap();
            assert_eq!(network.required_confirmations, 1);
            assert_eq!(network.block_time, 2);
            assert_eq!(network.default_transaction_type, TransactionType::Dynamic);
            assert_eq!(network.default_provider.as_deref(), Some("node"));
            assert_eq!(network.gas_limit, GasLimit::Auto);
            assert_eq!(network.acceptance_timeout(), Duration::from_secs(120));
        }
    }

    #[test]
    fn test_local_variants_are_instant() {
        let config = LineaConfig::default();
        let local_names: Vec<_> = config
            .entries()
            .into_iter()
            .filter(|(name, _)| name == "local" || name.ends_with("-fork"))
            .collect();
        assert_eq!(local_names.len(), NETWORKS.len() + 1);
        for (name, network) in local_names {
            assert!(network.is_instant(), "{name} is not instant");
            assert_eq!(network.gas_limit, GasLimit::Max, "{name}");
            assert_eq!(network.acceptance_timeout(), Duration::from_secs(20));
        }
    }

    #[test]
    fn test_local_gas_limit_is_max() {
        assert_eq!(LineaConfig::default().local.gas_limit, GasLimit::Max);
        assert_eq!(
            LineaConfig::default().local.default_provider.as_deref(),
            Some("test")
        );
        assert_eq!(LineaConfig::default().mainnet_fork.network.default_provider, None);
    }

    #[rstest]
    #[case::live("mainnet")]
    #[case::fork_dash("mainnet-fork")]
    #[case::fork_underscore("goerli_fork")]
    #[case::local("local")]
    fn test_get_known(#[case] name: &str) {
        assert!(LineaConfig::default().get(name).is_ok());
    }

    #[rstest]
    #[case::unknown("sepolia")]
    #[case::unknown_fork("sepolia-fork")]
    #[case::empty("")]
    fn test_get_unknown(#[case] name: &str) {
        assert!(matches!(
            LineaConfig::default().get(name),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_slow_fork() {
        let mut config = LineaConfig::default();
        config.goerli_fork.network.block_time = 12;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_default_network() {
        let config = LineaConfig {
            default_network: "optimism".to_owned(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(LineaConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::auto(json!("auto"), GasLimit::Auto)]
    #[case::max(json!("MAX"), GasLimit::Max)]
    #[case::fixed(json!(30_000_000), GasLimit::Fixed(30_000_000))]
    #[case::hex(json!("0x5208"), GasLimit::Fixed(21_000))]
    fn test_gas_limit_deserialize(#[case] raw: serde_json::Value, #[case] expected: GasLimit) {
        assert_eq!(serde_json::from_value::<GasLimit>(raw).unwrap(), expected);
    }

    #[test]
    fn test_fork_roundtrips_through_toml() {
        let fork = create_fork_config(Some("node"));
        let text = toml::to_string(&fork).unwrap();
        assert!(text.contains("upstream_provider = \"node\""));
        assert!(text.contains("gas_limit = \"max\""));
        let parsed: ForkedNetworkConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, fork);
    }
}
