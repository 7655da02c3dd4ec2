//! Unified error types for the Linea adapter.

use thiserror::Error;

/// Top-level error type for the Linea adapter.
///
/// Nothing in this crate recovers from these; each variant is surfaced to
/// the caller exactly as produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A value could not be interpreted as the requested type (integer, hex,
    /// unit amount, transaction type code).
    #[error("conversion: {0}")]
    Conversion(String),

    /// The selected transaction variant rejected its fields.
    #[error("construction: {0}")]
    Construction(String),

    /// Configuration file could not be resolved, read, parsed, or names an
    /// unknown network.
    #[error("config: {0}")]
    Config(String),

    /// Plugin registration was rejected by the host.
    #[error("registry: {0}")]
    Registry(String),

    /// Function ABI could not be parsed or its arguments could not be encoded.
    #[error("abi: {0}")]
    Abi(String),
}

impl Error {
    /// Shorthand for [`Error::Conversion`].
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Shorthand for [`Error::Construction`].
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Shorthand for [`Error::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// [`Error::Config`] carrying the display form of an underlying cause.
    pub fn config_with(msg: impl AsRef<str>, source: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {source}", msg.as_ref()))
    }

    /// Shorthand for [`Error::Registry`].
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// [`Error::Abi`] carrying the display form of an underlying cause.
    pub fn abi_with(msg: impl AsRef<str>, source: impl std::fmt::Display) -> Self {
        Self::Abi(format!("{}: {source}", msg.as_ref()))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::conversion(Error::conversion("bad hex"), "conversion: bad hex")]
    #[case::construction(Error::construction("missing gas"), "construction: missing gas")]
    #[case::config_with(
        Error::config_with("failed to read 'linea.toml'", "not found"),
        "config: failed to read 'linea.toml': not found"
    )]
    #[case::abi_with(Error::abi_with("encode", "too few args"), "abi: encode: too few args")]
    fn test_error_display(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
