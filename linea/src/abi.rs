//! ABI helpers for turning a signature and string arguments into calldata
//! inputs.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::{Function, Param};

use crate::error::{Error, Result};

/// Parses a function signature such as `fooAndBar()` or
/// `function transfer(address to, uint256 amount)`.
///
/// # Errors
///
/// Returns [`Error::Abi`] if the signature does not parse.
pub fn parse_function(signature: &str) -> Result<Function> {
    Function::parse(signature)
        .map_err(|e| Error::abi_with(format!("could not parse function signature '{signature}'"), e))
}

/// Coerces string arguments into values of the matching input types.
///
/// # Errors
///
/// Returns [`Error::Abi`] if the argument count differs from the input count
/// or an argument does not coerce to its type.
pub fn coerce_args<S: AsRef<str>>(inputs: &[Param], args: &[S]) -> Result<Vec<DynSolValue>> {
    if inputs.len() != args.len() {
        return Err(Error::Abi(format!(
            "expected {} argument(s), got {}",
            inputs.len(),
            args.len()
        )));
    }
    std::iter::zip(inputs, args)
        .map(|(input, arg)| coerce_value(&input.selector_type(), arg.as_ref()))
        .collect()
}

fn coerce_value(ty: &str, arg: &str) -> Result<DynSolValue> {
    let resolved =
        DynSolType::parse(ty).map_err(|e| Error::abi_with(format!("unsupported type '{ty}'"), e))?;
    resolved
        .coerce_str(arg)
        .map_err(|e| Error::abi_with(format!("invalid {ty} argument '{arg}'"), e))
}
