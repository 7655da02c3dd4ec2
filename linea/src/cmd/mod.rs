//! CLI definitions and command implementations for the `linea` binary.

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand};
use linea::config::load_config;
use linea::{Error, LineaConfig, ProviderContext};

pub mod init;
pub mod networks;
pub mod tx;

/// Linea ecosystem adapter — network registry and transaction normalizer.
#[derive(Debug, Parser)]
#[command(name = "linea")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a default TOML configuration file.
    Init {
        /// Output path for the configuration file.
        #[arg(short, long, default_value = "linea.toml")]
        output: PathBuf,

        /// Overwrite the file if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// List the registered networks and their settings.
    Networks {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Normalize a JSON transaction request and print the transaction.
    Tx {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        provider: ProviderArgs,

        /// Request fields as a JSON object.
        #[arg(default_value = "{}")]
        fields: String,
    },

    /// Encode a contract call and print the resulting transaction.
    Encode {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        provider: ProviderArgs,

        /// Contract address.
        #[arg(long)]
        to: Address,

        /// Function signature, e.g. `transfer(address,uint256)`.
        #[arg(long)]
        sig: String,

        /// Extra request fields as a JSON object.
        #[arg(long, default_value = "{}")]
        fields: String,

        /// Call arguments, one per function input.
        args: Vec<String>,
    },
}

/// Configuration file selection.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "LINEA_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Loads the selected file, or the defaults.
    pub fn load(&self) -> Result<LineaConfig, Error> {
        self.config
            .as_deref()
            .map_or_else(|| Ok(LineaConfig::default()), load_config)
    }
}

/// Simulated provider connection.
#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// Network the provider is connected to. No provider when omitted.
    #[arg(short, long)]
    pub network: Option<String>,

    /// Override the chain ID the provider reports.
    #[arg(long, requires = "network")]
    pub chain_id: Option<u64>,

    /// Block gas maximum the provider reports.
    #[arg(long, requires = "network")]
    pub max_gas: Option<u64>,
}

impl ProviderArgs {
    /// Builds the provider snapshot, if a network was selected.
    pub fn context(&self) -> Result<Option<ProviderContext>, Error> {
        let Some(network) = self.network.as_deref() else {
            return Ok(None);
        };
        let mut context = ProviderContext::for_network(network, self.max_gas)?;
        if let Some(chain_id) = self.chain_id {
            context.chain_id = chain_id;
        }
        Ok(Some(context))
    }
}
