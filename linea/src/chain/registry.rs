//! Plugin registration.
//!
//! [`register`] walks the fixed network table and hands every binding to a
//! [`PluginHost`]. [`Registry`] is an in-memory host used by the CLI and
//! tests.

use super::config::LineaConfig;
use super::networks::{ECOSYSTEM_NAME, LOCAL_NETWORK_NAME, NETWORKS, NetworkDescriptor};
use super::provider::ProviderKind;
use crate::ecosystem::Linea;
use crate::error::Error;

/// Flavour of a registered network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// A live network with fixed chain and network IDs.
    Live(&'static NetworkDescriptor),
    /// A local fork replaying the state of a live network.
    Fork(&'static NetworkDescriptor),
    /// The in-process development network.
    Local,
}

impl NetworkKind {
    /// Chain ID of the network, or of the forked upstream.
    #[must_use]
    pub const fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Live(network) | Self::Fork(network) => Some(network.chain_id),
            Self::Local => None,
        }
    }
}

/// Registration hooks exposed by the host framework.
pub trait PluginHost {
    /// Error raised when the host refuses a registration.
    type Error;

    /// Registers the ecosystem's configuration.
    ///
    /// # Errors
    ///
    /// Host-defined.
    fn register_config(&mut self, ecosystem: &str, config: LineaConfig) -> Result<(), Self::Error>;

    /// Registers the ecosystem itself.
    ///
    /// # Errors
    ///
    /// Host-defined.
    fn register_ecosystem(&mut self, ecosystem: Linea) -> Result<(), Self::Error>;

    /// Registers a network under an ecosystem.
    ///
    /// # Errors
    ///
    /// Host-defined.
    fn register_network(
        &mut self,
        ecosystem: &str,
        network: &str,
        kind: NetworkKind,
    ) -> Result<(), Self::Error>;

    /// Binds a provider to a network.
    ///
    /// # Errors
    ///
    /// Host-defined.
    fn register_provider(
        &mut self,
        ecosystem: &str,
        network: &str,
        provider: ProviderKind,
    ) -> Result<(), Self::Error>;
}

/// Registers the Linea config, ecosystem, networks and providers with `host`.
///
/// Every live network is registered with a `-fork` sibling and bound to the
/// node provider; `local` is bound to the test provider. Forks get no
/// provider here.
///
/// # Errors
///
/// Propagates the first error raised by the host.
pub fn register<H: PluginHost>(host: &mut H, config: &LineaConfig) -> Result<(), H::Error> {
    host.register_config(ECOSYSTEM_NAME, config.clone())?;
    host.register_ecosystem(Linea::new(config.clone()))?;

    for network in &NETWORKS {
        host.register_network(ECOSYSTEM_NAME, network.name, NetworkKind::Live(network))?;
        host.register_network(ECOSYSTEM_NAME, &network.fork_name(), NetworkKind::Fork(network))?;
    }
    host.register_network(ECOSYSTEM_NAME, LOCAL_NETWORK_NAME, NetworkKind::Local)?;

    for network in &NETWORKS {
        host.register_provider(ECOSYSTEM_NAME, network.name, ProviderKind::Node)?;
    }
    host.register_provider(ECOSYSTEM_NAME, LOCAL_NETWORK_NAME, ProviderKind::Test)?;

    tracing::debug!(
        ecosystem = ECOSYSTEM_NAME,
        networks = NETWORKS.len() * 2 + 1,
        "registered ecosystem"
    );
    Ok(())
}

/// A registered network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    /// Owning ecosystem.
    pub ecosystem: String,
    /// Network name.
    pub name: String,
    /// Network flavour.
    pub kind: NetworkKind,
    /// Bound provider, if any.
    pub provider: Option<ProviderKind>,
}

/// In-memory [`PluginHost`].
#[derive(Debug, Default)]
pub struct Registry {
    config: Option<LineaConfig>,
    ecosystem: Option<Linea>,
    networks: Vec<NetworkEntry>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the Linea plugin installed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registry`] on duplicate registrations.
    pub fn with_linea(config: &LineaConfig) -> Result<Self, Error> {
        let mut registry = Self::new();
        register(&mut registry, config)?;
        Ok(registry)
    }

    /// Registered networks, in registration order.
    #[must_use]
    pub fn networks(&self) -> &[NetworkEntry] {
        &self.networks
    }

    /// Registered network by name.
    #[must_use]
    pub fn network(&self, name: &str) -> Option<&NetworkEntry> {
        self.networks.iter().find(|entry| entry.name == name)
    }

    /// Provider bound to a network.
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<ProviderKind> {
        self.network(name).and_then(|entry| entry.provider)
    }

    /// Registered configuration.
    #[must_use]
    pub const fn config(&self) -> Option<&LineaConfig> {
        self.config.as_ref()
    }

    /// Registered ecosystem.
    #[must_use]
    pub const fn ecosystem(&self) -> Option<&Linea> {
        self.ecosystem.as_ref()
    }
}

impl PluginHost for Registry {
    type Error = Error;

    fn register_config(&mut self, ecosystem: &str, config: LineaConfig) -> Result<(), Error> {
        if self.config.is_some() {
            return Err(Error::registry(format!(
                "config for '{ecosystem}' already registered"
            )));
        }
        self.config = Some(config);
        Ok(())
    }

    fn register_ecosystem(&mut self, ecosystem: Linea) -> Result<(), Error> {
        if self.ecosystem.is_some() {
            return Err(Error::registry(format!(
                "ecosystem '{}' already registered",
                Linea::NAME
            )));
        }
        self.ecosystem = Some(ecosystem);
        Ok(())
    }

    fn register_network(
        &mut self,
        ecosystem: &str,
        network: &str,
        kind: NetworkKind,
    ) -> Result<(), Error> {
        if self
            .networks
            .iter()
            .any(|entry| entry.ecosystem == ecosystem && entry.name == network)
        {
            return Err(Error::registry(format!(
                "network '{ecosystem}:{network}' already registered"
            )));
        }
        self.networks.push(NetworkEntry {
            ecosystem: ecosystem.to_owned(),
            name: network.to_owned(),
            kind,
            provider: None,
        });
        Ok(())
    }

    fn register_provider(
        &mut self,
        ecosystem: &str,
        network: &str,
        provider: ProviderKind,
    ) -> Result<(), Error> {
        let entry = self
            .networks
            .iter_mut()
            .find(|entry| entry.ecosystem == ecosystem && entry.name == network)
            .ok_or_else(|| {
                Error::registry(format!("network '{ecosystem}:{network}' is not registered"))
            })?;
        if let Some(existing) = entry.provider {
            return Err(Error::registry(format!(
                "network '{ecosystem}:{network}' already bound to '{existing}'"
            )));
        }
        entry.provider = Some(provider);
        Ok(())
    }
}
