//! The Linea ecosystem.
//!
//! Linea accepts both envelope types, but type 0 is chosen whenever the
//! request carries a legacy `gas_price`, even on networks whose configured
//! default is dynamic-fee. [`Linea::create_transaction`] turns a loosely-typed
//! [`TransactionRequest`] into a concrete [`Transaction`]:
//!
//! 1. resolve the envelope type (`type`, then `gas_price`, then the network default);
//! 2. default `required_confirmations` from the connected network;
//! 3. parse a hex `chainId`, or take the provider's chain ID;
//! 4. fold wire spellings into canonical ones (`input` → `data`,
//!    `max_fee_per_gas` → `max_fee`, `max_priority_fee_per_gas` →
//!    `max_priority_fee`, `gas_limit` → `gas`);
//! 5. assemble `v`/`r`/`s` into a signature;
//! 6. convert `value` to wei;
//! 7. apply the network's gas-limit policy and build the variant.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::{Function, StateMutability};
use alloy_primitives::{Address, U256};

use crate::chain::{ECOSYSTEM_NAME, GasLimit, LineaConfig, NetworkConfig, ProviderContext};
use crate::convert::{Numeric, convert, parse_hex_u64};
use crate::error::{Error, Result};
use crate::transaction::{
    Field, Transaction, TransactionFields, TransactionRequest, TransactionSignature,
    TransactionType,
};

/// Linea ecosystem bound to its configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Linea {
    config: LineaConfig,
}

impl Linea {
    /// Ecosystem name.
    pub const NAME: &'static str = ECOSYSTEM_NAME;

    /// Creates the ecosystem over a loaded configuration.
    #[must_use]
    pub const fn new(config: LineaConfig) -> Self {
        Self { config }
    }

    /// Ecosystem configuration.
    #[must_use]
    pub const fn config(&self) -> &LineaConfig {
        &self.config
    }

    /// Configuration of the connected network, or of the default network
    /// when nothing is connected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the network has no configuration entry.
    pub fn network_config(&self, provider: Option<&ProviderContext>) -> Result<&NetworkConfig> {
        match provider {
            Some(provider) => self.config.get(&provider.network),
            None => self.config.default_network_config(),
        }
    }

    /// Envelope type used when a request names neither `type` nor `gas_price`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the network has no configuration entry.
    pub fn default_transaction_type(
        &self,
        provider: Option<&ProviderContext>,
    ) -> Result<TransactionType> {
        self.network_config(provider)
            .map(|network| network.default_transaction_type)
    }

    /// Builds a transaction from loosely-typed request fields.
    ///
    /// `provider` is the connected provider, if any; it supplies the chain ID,
    /// confirmation count and gas maximum for fields the request leaves out.
    ///
    /// # Errors
    ///
    /// - [`Error::Conversion`] if `type`, `chainId` or `value` cannot be
    ///   converted, or `type` names an unsupported envelope.
    /// - [`Error::Construction`] if the selected variant rejects the fields or
    ///   the signature is incomplete.
    /// - [`Error::Config`] if the connected network has no configuration.
    pub fn create_transaction(
        &self,
        request: TransactionRequest,
        provider: Option<&ProviderContext>,
    ) -> Result<Transaction> {
        let network = self.network_config(provider)?;

        let tx_type = match &request.tx_type {
            Field::Set(raw) => TransactionType::from_code(convert::<u64>(raw)?)?,
            Field::Null => network.default_transaction_type,
            Field::Absent if request.gas_price.is_present() => TransactionType::Static,
            Field::Absent => network.default_transaction_type,
        };

        let required_confirmations = match request.required_confirmations {
            Field::Set(confirmations) => confirmations,
            Field::Absent | Field::Null => {
                provider.map_or(0, |_| network.required_confirmations)
            }
        };

        let chain_id = match request.chain_id {
            Field::Set(Numeric::Text(text)) => Some(parse_hex_u64(&text)?),
            Field::Set(raw) => Some(convert::<u64>(&raw)?),
            Field::Null => None,
            Field::Absent => provider.map(|provider| provider.chain_id),
        };

        let signature = match (request.v, request.r, request.s) {
            (Some(v), Some(r), Some(s)) => Some(TransactionSignature { v, r, s }),
            (None, None, None) => request.signature,
            _ => {
                return Err(Error::construction(
                    "signature requires all of v, r and s",
                ));
            }
        };

        let value = request
            .value
            .as_ref()
            .map(convert::<U256>)
            .transpose()?
            .unwrap_or_default();

        let gas = match request.gas_limit {
            Field::Set(gas) => Some(gas),
            Field::Null => None,
            Field::Absent => request.gas,
        };
        let gas = gas.or_else(|| resolve_gas_limit(network.gas_limit, provider));

        tracing::debug!(
            %tx_type,
            ?chain_id,
            ?gas,
            required_confirmations,
            "normalized transaction fields"
        );

        Transaction::build(TransactionFields {
            tx_type,
            chain_id,
            sender: request.sender,
            receiver: request.receiver,
            nonce: request.nonce,
            gas,
            value,
            data: request.input.or(request.data).unwrap_or_default(),
            gas_price: request.gas_price.into_option(),
            max_fee: request.max_fee_per_gas.or(request.max_fee),
            max_priority_fee: request.max_priority_fee_per_gas.or(request.max_priority_fee),
            required_confirmations,
            signature,
        })
    }

    /// Builds a call to `function` on `address`.
    ///
    /// The arguments are ABI-encoded (selector included) into `data`, `address`
    /// becomes the receiver, and the rest of `request` is normalized by
    /// [`Self::create_transaction`].
    ///
    /// # Errors
    ///
    /// - [`Error::Abi`] if `args` do not match the function inputs.
    /// - [`Error::Construction`] if value is sent to a non-payable function.
    /// - Anything [`Self::create_transaction`] returns.
    pub fn encode_transaction(
        &self,
        address: Address,
        function: &Function,
        args: &[DynSolValue],
        mut request: TransactionRequest,
        provider: Option<&ProviderContext>,
    ) -> Result<Transaction> {
        let calldata = function
            .abi_encode_input(args)
            .map_err(|e| Error::abi_with(format!("failed to encode '{}'", function.signature()), e))?;

        request.receiver = Some(address);
        request.input = None;
        request.data = Some(calldata.into());

        let transaction = self.create_transaction(request, provider)?;
        if function.state_mutability != StateMutability::Payable
            && !transaction.common().value.is_zero()
        {
            return Err(Error::construction(format!(
                "'{}' is not payable but value {} was sent",
                function.name,
                transaction.common().value
            )));
        }
        Ok(transaction)
    }
}

fn resolve_gas_limit(policy: GasLimit, provider: Option<&ProviderContext>) -> Option<u64> {
    match policy {
        GasLimit::Max => provider.map(|provider| provider.max_gas),
        GasLimit::Fixed(gas) => Some(gas),
        GasLimit::Auto => None,
    }
}
