//! Loosely-typed transaction request.
//!
//! Every recognized field is declared. [`Field`] keeps "not given" apart from
//! "given as null" where the normalizer treats the two differently.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Deserializer};

use super::TransactionSignature;
use crate::convert::Numeric;

/// A request field that may be absent, explicitly null, or set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// Not supplied at all.
    #[default]
    Absent,
    /// Supplied as null.
    Null,
    /// Supplied with a value.
    Set(T),
}

impl<T> Field<T> {
    /// Whether the field was supplied, even as null.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Returns the value, if set.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Converts into an `Option`, collapsing absent and null.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Set))
    }
}

/// Caller-supplied transaction fields, before normalization.
///
/// Deserializes from the JSON keyword form (`{"type": "0x0", "chainId": ...}`).
/// Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionRequest {
    /// Envelope type: integer, hex/decimal text, or null for the network default.
    #[serde(rename = "type")]
    pub tx_type: Field<Numeric>,
    /// Chain ID; text is read as hexadecimal.
    #[serde(rename = "chainId", alias = "chain_id")]
    pub chain_id: Field<Numeric>,
    /// Legacy gas price. Its presence alone selects a static-fee transaction.
    pub gas_price: Field<u128>,
    /// EIP-1559 max fee, wire spelling.
    pub max_fee_per_gas: Option<u128>,
    /// EIP-1559 priority fee, wire spelling.
    pub max_priority_fee_per_gas: Option<u128>,
    /// EIP-1559 max fee, canonical spelling.
    pub max_fee: Option<u128>,
    /// EIP-1559 priority fee, canonical spelling.
    pub max_priority_fee: Option<u128>,
    /// Gas limit; wins over `gas` whenever supplied.
    pub gas_limit: Field<u64>,
    /// Gas limit, canonical spelling.
    pub gas: Option<u64>,
    /// Amount in wei: integer, hex/decimal text, or a unit amount.
    pub value: Option<Numeric>,
    /// Call data, wire spelling.
    pub input: Option<Bytes>,
    /// Call data, canonical spelling.
    pub data: Option<Bytes>,
    /// Signature recovery value.
    pub v: Option<u64>,
    /// Signature `r`.
    pub r: Option<Bytes>,
    /// Signature `s`.
    pub s: Option<Bytes>,
    /// Pre-assembled signature.
    pub signature: Option<TransactionSignature>,
    /// Account nonce.
    pub nonce: Option<u64>,
    /// Sending account.
    #[serde(alias = "from")]
    pub sender: Option<Address>,
    /// Receiving account or contract.
    #[serde(alias = "to")]
    pub receiver: Option<Address>,
    /// Confirmations to wait for; null or absent uses the network default.
    pub required_confirmations: Field<u64>,
}
