//! `linea tx` and `linea encode` commands — normalize a transaction request
//! and print the result as JSON.

use alloy_primitives::Address;
use linea::abi::{coerce_args, parse_function};
use linea::{Error, Linea, LineaConfig, ProviderContext, TransactionRequest};

/// Parse a JSON object of request fields.
fn parse_fields(fields: &str) -> Result<TransactionRequest, Error> {
    serde_json::from_str(fields)
        .map_err(|e| Error::conversion(format!("invalid transaction fields: {e}")))
}

#[allow(clippy::print_stdout)]
fn print_json(transaction: &linea::Transaction) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(transaction)
        .map_err(|e| Error::conversion(format!("failed to serialize transaction: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Execute the `tx` command.
///
/// # Errors
///
/// Returns an error if the fields do not parse or normalization fails.
pub fn run(
    config: LineaConfig,
    provider: Option<&ProviderContext>,
    fields: &str,
) -> Result<(), Error> {
    let request = parse_fields(fields)?;
    let transaction = Linea::new(config).create_transaction(request, provider)?;
    print_json(&transaction)
}

/// Execute the `encode` command.
///
/// # Errors
///
/// Returns an error if the signature or arguments do not parse, the fields do
/// not parse, or normalization fails.
pub fn run_encode(
    config: LineaConfig,
    provider: Option<&ProviderContext>,
    to: Address,
    signature: &str,
    args: &[String],
    fields: &str,
) -> Result<(), Error> {
    let function = parse_function(signature)?;
    let values = coerce_args(&function.inputs, args)?;
    let request = parse_fields(fields)?;
    let transaction =
        Linea::new(config).encode_transaction(to, &function, &values, request, provider)?;
    print_json(&transaction)
}
