//! Linea networks, configuration, providers and plugin registration.
//!
//! - [`networks`] — fixed network identities and naming helpers.
//! - [`config`] — per-network tunables and their factories.
//! - [`provider`] — provider bindings and the [`ProviderContext`] snapshot.
//! - [`registry`] — [`PluginHost`] hooks and the [`register`] routine.

pub mod config;
pub mod networks;
pub mod provider;
pub mod registry;

pub use self::config::*;
pub use self::networks::*;
pub use self::provider::*;
pub use self::registry::*;
