//! Canonical transaction variants.
//!
//! - [`TransactionType`] — the two supported envelope codes and their lookup table.
//! - [`StaticFeeTransaction`] / [`DynamicFeeTransaction`] — strongly-typed
//!   variants with their own field validation.
//! - [`Transaction`] — tagged union over both variants.
//! - [`request`] — the loosely-typed input record consumed by the normalizer.

pub mod request;

use std::fmt;

use alloy_network::{Ethereum, Network, TransactionBuilder};
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::convert::{Numeric, convert};
use crate::error::{Error, Result};

pub use self::request::{Field, TransactionRequest};

/// Alloy request type for the Ethereum network family.
pub type EthTransactionRequest = <Ethereum as Network>::TransactionRequest;

/// Transaction envelope type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionType {
    /// Pre-EIP-1559 transaction with a single `gas_price`.
    Static,
    /// EIP-1559 transaction with separate max and priority fees.
    #[default]
    Dynamic,
}

/// Code → variant table. Codes outside it are rejected.
const TRANSACTION_TYPES: [(u64, TransactionType); 2] = [
    (0, TransactionType::Static),
    (2, TransactionType::Dynamic),
];

impl TransactionType {
    /// Looks up the variant for an envelope code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] for codes other than `0` and `2`.
    pub fn from_code(code: u64) -> Result<Self> {
        TRANSACTION_TYPES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, tx_type)| *tx_type)
            .ok_or_else(|| Error::conversion(format!("unsupported transaction type {code}")))
    }

    /// Envelope code of this variant.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Static => 0,
            Self::Dynamic => 2,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Dynamic => f.write_str("dynamic"),
        }
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = Numeric::deserialize(deserializer)?;
        if let Numeric::Text(name) = &raw {
            if name.eq_ignore_ascii_case("static") {
                return Ok(Self::Static);
            }
            if name.eq_ignore_ascii_case("dynamic") {
                return Ok(Self::Dynamic);
            }
        }
        convert::<u64>(&raw)
            .and_then(Self::from_code)
            .map_err(D::Error::custom)
    }
}

/// Signature parts attached to an already-signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// Recovery value, as given.
    pub v: u64,
    /// `r` component, raw bytes.
    pub r: Bytes,
    /// `s` component, raw bytes.
    pub s: Bytes,
}

/// Fully normalized constructor input shared by both variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFields {
    /// Resolved envelope type.
    pub tx_type: TransactionType,
    /// EIP-155 chain ID.
    pub chain_id: Option<u64>,
    /// Sending account.
    pub sender: Option<Address>,
    /// Receiving account or contract; `None` for deployments.
    pub receiver: Option<Address>,
    /// Account nonce.
    pub nonce: Option<u64>,
    /// Gas limit.
    pub gas: Option<u64>,
    /// Amount transferred, in wei.
    pub value: U256,
    /// Call data.
    pub data: Bytes,
    /// Legacy gas price.
    pub gas_price: Option<u128>,
    /// EIP-1559 max fee per gas.
    pub max_fee: Option<u128>,
    /// EIP-1559 max priority fee per gas.
    pub max_priority_fee: Option<u128>,
    /// Blocks to wait before the transaction counts as final.
    pub required_confirmations: u64,
    /// Signature, when the transaction is already signed.
    pub signature: Option<TransactionSignature>,
}

/// Fields common to both transaction variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCommon {
    /// EIP-155 chain ID.
    pub chain_id: Option<u64>,
    /// Sending account.
    #[serde(rename = "from")]
    pub sender: Option<Address>,
    /// Receiving account or contract.
    #[serde(rename = "to")]
    pub receiver: Option<Address>,
    /// Account nonce.
    pub nonce: Option<u64>,
    /// Gas limit.
    #[serde(rename = "gas")]
    pub gas_limit: Option<u64>,
    /// Amount transferred, in wei.
    pub value: U256,
    /// Call data.
    pub data: Bytes,
    /// Blocks to wait before the transaction counts as final.
    pub required_confirmations: u64,
    /// Signature, when already signed.
    pub signature: Option<TransactionSignature>,
}

impl TransactionCommon {
    fn from_fields(fields: TransactionFields) -> Self {
        Self {
            chain_id: fields.chain_id,
            sender: fields.sender,
            receiver: fields.receiver,
            nonce: fields.nonce,
            gas_limit: fields.gas,
            value: fields.value,
            data: fields.data,
            required_confirmations: fields.required_confirmations,
            signature: fields.signature,
        }
    }
}

/// Pre-EIP-1559 transaction (type 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticFeeTransaction {
    /// Common fields.
    #[serde(flatten)]
    pub common: TransactionCommon,
    /// Fixed gas price.
    pub gas_price: Option<u128>,
}

impl StaticFeeTransaction {
    /// Builds a static-fee transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if EIP-1559 fee fields are present.
    pub fn new(fields: TransactionFields) -> Result<Self> {
        if fields.max_fee.is_some() {
            return Err(Error::construction(
                "static-fee transaction does not accept max_fee",
            ));
        }
        if fields.max_priority_fee.is_some() {
            return Err(Error::construction(
                "static-fee transaction does not accept max_priority_fee",
            ));
        }
        let gas_price = fields.gas_price;
        Ok(Self {
            common: TransactionCommon::from_fields(fields),
            gas_price,
        })
    }
}

/// EIP-1559 transaction (type 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFeeTransaction {
    /// Common fields.
    #[serde(flatten)]
    pub common: TransactionCommon,
    /// Max fee per gas.
    #[serde(rename = "maxFeePerGas")]
    pub max_fee: Option<u128>,
    /// Max priority fee per gas.
    #[serde(rename = "maxPriorityFeePerGas")]
    pub max_priority_fee: Option<u128>,
}

impl DynamicFeeTransaction {
    /// Builds a dynamic-fee transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if `gas_price` is present or the
    /// priority fee exceeds the max fee.
    pub fn new(fields: TransactionFields) -> Result<Self> {
        if fields.gas_price.is_some() {
            return Err(Error::construction(
                "dynamic-fee transaction does not accept gas_price",
            ));
        }
        if let (Some(max_fee), Some(priority)) = (fields.max_fee, fields.max_priority_fee)
            && priority > max_fee
        {
            return Err(Error::construction(format!(
                "max_priority_fee ({priority}) exceeds max_fee ({max_fee})"
            )));
        }
        let (max_fee, max_priority_fee) = (fields.max_fee, fields.max_priority_fee);
        Ok(Self {
            common: TransactionCommon::from_fields(fields),
            max_fee,
            max_priority_fee,
        })
    }
}

/// A constructed transaction of either variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Type 0.
    Static(StaticFeeTransaction),
    /// Type 2.
    Dynamic(DynamicFeeTransaction),
}

impl Transaction {
    /// Dispatches `fields` to the constructor selected by `fields.tx_type`.
    ///
    /// # Errors
    ///
    /// Propagates the chosen variant's [`Error::Construction`].
    pub fn build(fields: TransactionFields) -> Result<Self> {
        match fields.tx_type {
            TransactionType::Static => StaticFeeTransaction::new(fields).map(Self::Static),
            TransactionType::Dynamic => DynamicFeeTransaction::new(fields).map(Self::Dynamic),
        }
    }

    /// Envelope type of this transaction.
    #[must_use]
    pub const fn tx_type(&self) -> TransactionType {
        match self {
            Self::Static(_) => TransactionType::Static,
            Self::Dynamic(_) => TransactionType::Dynamic,
        }
    }

    /// Fields common to both variants.
    #[must_use]
    pub const fn common(&self) -> &TransactionCommon {
        match self {
            Self::Static(tx) => &tx.common,
            Self::Dynamic(tx) => &tx.common,
        }
    }

    /// Gas limit, if resolved.
    #[must_use]
    pub const fn gas_limit(&self) -> Option<u64> {
        self.common().gas_limit
    }

    /// Chain ID, if known.
    #[must_use]
    pub const fn chain_id(&self) -> Option<u64> {
        self.common().chain_id
    }

    /// Required confirmations.
    #[must_use]
    pub const fn required_confirmations(&self) -> u64 {
        self.common().required_confirmations
    }

    /// Signature, when already signed.
    #[must_use]
    pub const fn signature(&self) -> Option<&TransactionSignature> {
        self.common().signature.as_ref()
    }

    /// Converts into alloy's Ethereum request type for submission through a
    /// provider. Confirmation count and signature are not part of a request
    /// and are dropped.
    #[must_use]
    pub fn into_request(self) -> EthTransactionRequest {
        let tx_type = self.tx_type();
        let (common, mut request) = match self {
            Self::Static(tx) => {
                let mut request = EthTransactionRequest::default();
                if let Some(gas_price) = tx.gas_price {
                    request.set_gas_price(gas_price);
                }
                (tx.common, request)
            }
            Self::Dynamic(tx) => {
                let mut request = EthTransactionRequest::default();
                if let Some(max_fee) = tx.max_fee {
                    request.set_max_fee_per_gas(max_fee);
                }
                if let Some(priority) = tx.max_priority_fee {
                    request.set_max_priority_fee_per_gas(priority);
                }
                (tx.common, request)
            }
        };
        request.transaction_type = Some(tx_type.code());
        if let Some(chain_id) = common.chain_id {
            request.set_chain_id(chain_id);
        }
        if let Some(sender) = common.sender {
            request.set_from(sender);
        }
        if let Some(receiver) = common.receiver {
            request.set_to(receiver);
        }
        if let Some(nonce) = common.nonce {
            request.set_nonce(nonce);
        }
        if let Some(gas_limit) = common.gas_limit {
            request.set_gas_limit(gas_limit);
        }
        request
            .with_value(common.value)
            .with_input(common.data)
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            r#type: u8,
            #[serde(flatten)]
            tx: &'a T,
        }

        let r#type = self.tx_type().code();
        match self {
            Self::Static(tx) => Tagged { r#type, tx }.serialize(serializer),
            Self::Dynamic(tx) => Tagged { r#type, tx }.serialize(serializer),
        }
    }
}
