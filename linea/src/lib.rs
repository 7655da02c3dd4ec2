//! Linea ecosystem adapter.
//!
//! Registers the Linea networks (mainnet, goerli, their local forks and a
//! local development network) with a host framework, supplies their default
//! tunables, and normalizes loosely-typed transaction requests into concrete
//! transactions. Linea prefers static-fee (type 0) transactions whenever a
//! request carries a legacy `gas_price`.
//!
//! ```
//! use linea::chain::ProviderContext;
//! use linea::transaction::{TransactionRequest, TransactionType};
//! use linea::Linea;
//!
//! let linea = Linea::default();
//! let provider = ProviderContext::for_network("local", None)?;
//! let request: TransactionRequest = serde_json::from_str(r#"{"type": "0x0"}"#)
//!     .map_err(|e| linea::Error::conversion(e.to_string()))?;
//! let tx = linea.create_transaction(request, Some(&provider))?;
//! assert_eq!(tx.tx_type(), TransactionType::Static);
//! assert_eq!(tx.gas_limit(), Some(provider.max_gas));
//! # Ok::<(), linea::Error>(())
//! ```

pub mod abi;
pub mod chain;
pub mod config;
pub mod convert;
pub mod ecosystem;
pub mod error;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod transaction;

pub use crate::chain::{LineaConfig, ProviderContext, Registry, register};
pub use crate::ecosystem::Linea;
pub use crate::error::{Error, Result};
pub use crate::transaction::{Transaction, TransactionRequest, TransactionType};
