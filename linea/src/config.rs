//! Configuration loading and default template generation.
//!
//! This module provides:
//!
//! - [`load_config`] — Reads a TOML file and layers it over the defaults.
//! - [`parse_config`] — Same, from an in-memory string.
//! - [`generate_default_config`] — Produces a commented TOML template.
//!
//! # Configuration File Format
//!
//! Every key is optional; anything left out keeps its default.
//!
//! ```toml
//! default_network = "mainnet"
//!
//! [mainnet]
//! required_confirmations = 3
//!
//! [mainnet_fork]
//! upstream_provider = "node"
//! ```

use std::path::Path;

use crate::chain::config::{FORK_CONFIG_KEY, NETWORK_CONFIG_KEYS};
use crate::chain::LineaConfig;
use crate::error::{Error, Result};

/// Load configuration from a TOML file at the given path.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be resolved, read, or parsed,
/// names an unknown network or key, or breaks a network invariant.
pub fn load_config(path: &Path) -> Result<LineaConfig> {
    let config_path = path
        .canonicalize()
        .map_err(|e| Error::config_with(format!("failed to resolve config path '{}'", path.display()), e))?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Parse configuration from TOML text, layering each given key over the
/// factory defaults.
///
/// # Errors
///
/// See [`load_config`].
pub fn parse_config(content: &str) -> Result<LineaConfig> {
    let overrides: toml::Table =
        toml::from_str(content).map_err(|e| Error::config_with("failed to parse TOML config", e))?;
    let defaults = toml::Value::try_from(LineaConfig::default())
        .map_err(|e| Error::config_with("failed to render default config", e))?;
    let toml::Value::Table(mut merged) = defaults else {
        return Err(Error::config("default config did not render as a table"));
    };

    merge_overrides(&mut merged, overrides)?;

    let config: LineaConfig = toml::Value::Table(merged)
        .try_into()
        .map_err(|e| Error::config_with("invalid config", e))?;
    config.validate()?;
    Ok(config)
}

/// Overlays user keys onto the default document, one network field at a time.
fn merge_overrides(defaults: &mut toml::Table, overrides: toml::Table) -> Result<()> {
    for (key, value) in overrides {
        let Some(slot) = defaults.get_mut(&key) else {
            return Err(Error::config(format!("unknown network '{key}'")));
        };
        match (slot, value) {
            (toml::Value::Table(base), toml::Value::Table(fields)) => {
                let is_fork = key.ends_with("_fork");
                for (field, value) in fields {
                    let known = NETWORK_CONFIG_KEYS.contains(&field.as_str())
                        || (is_fork && field == FORK_CONFIG_KEY);
                    if !known {
                        return Err(Error::config(format!("unknown key '{field}' in [{key}]")));
                    }
                    base.insert(field, value);
                }
            }
            (slot, value) => *slot = value,
        }
    }
    Ok(())
}

/// Generate a default TOML configuration template.
///
/// Parsing the template yields [`LineaConfig::default`].
#[must_use]
pub fn generate_default_config() -> String {
    String::from(
        r#"# Linea ecosystem configuration
#
# Every key is optional; removed keys fall back to the values shown here.

# Network used when none is selected.
default_network = "local"

# ── Live networks ───────────────────────────────────────────────────
# default_transaction_type: 0 (static fee) or 2 (dynamic fee).
# Requests carrying `gas_price` always use type 0.
# gas_limit: "auto" (estimate), "max" (block maximum) or an integer.

[mainnet]
required_confirmations = 1
block_time = 2
default_transaction_type = 2
default_provider = "node"
gas_limit = "auto"
transaction_acceptance_timeout_secs = 120

[goerli]
required_confirmations = 1
block_time = 2
default_transaction_type = 2
default_provider = "node"
gas_limit = "auto"
transaction_acceptance_timeout_secs = 120

# ── Forks ───────────────────────────────────────────────────────────
# Local replicas of a live network. block_time and
# required_confirmations must stay 0.
# upstream_provider = "node"

[mainnet_fork]
required_confirmations = 0
block_time = 0
default_transaction_type = 2
gas_limit = "max"
transaction_acceptance_timeout_secs = 20

[goerli_fork]
required_confirmations = 0
block_time = 0
default_transaction_type = 2
gas_limit = "max"
transaction_acceptance_timeout_secs = 20

# ── Local development network ───────────────────────────────────────

[local]
required_confirmations = 0
block_time = 0
default_transaction_type = 2
default_provider = "test"
gas_limit = "max"
transaction_acceptance_timeout_secs = 20
"#,
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;
    use crate::chain::GasLimit;
    use crate::transaction::TransactionType;

    #[test]
    fn test_template_matches_defaults() {
        let config = parse_config(&generate_default_config()).unwrap();
        assert_eq!(config, LineaConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), LineaConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = parse_config(
            r#"
            default_network = "mainnet"

            [mainnet]
            required_confirmations = 3
            default_transaction_type = 0

            [goerli_fork]
            upstream_provider = "node"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_network, "mainnet");
        assert_eq!(config.mainnet.required_confirmations, 3);
        assert_eq!(config.mainnet.default_transaction_type, TransactionType::Static);
        assert_eq!(config.mainnet.block_time, 2);
        assert_eq!(config.mainnet.gas_limit, GasLimit::Auto);
        assert_eq!(config.goerli_fork.upstream_provider.as_deref(), Some("node"));
        assert_eq!(config.goerli_fork.network.gas_limit, GasLimit::Max);
        assert_eq!(config.goerli, LineaConfig::default().goerli);
    }

    #[rstest]
    #[case::unknown_network("[sepolia]\nblock_time = 1\n")]
    #[case::unknown_key("[mainnet]\nblocktime = 1\n")]
    #[case::upstream_on_live("[mainnet]\nupstream_provider = \"node\"\n")]
    #[case::slow_local("[local]\nblock_time = 5\n")]
    #[case::confirming_fork("[mainnet_fork]\nrequired_confirmations = 2\n")]
    #[case::bad_default_network("default_network = \"optimism\"\n")]
    #[case::bad_type("[mainnet]\ndefault_transaction_type = 1\n")]
    #[case::not_toml("[mainnet")]
    fn test_rejects(#[case] content: &str) {
        assert!(matches!(parse_config(content), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[goerli]\ngas_limit = 8000000").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.goerli.gas_limit, GasLimit::Fixed(8_000_000));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here/linea.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to resolve config path"));
    }
}
