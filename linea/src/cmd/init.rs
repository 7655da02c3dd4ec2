//! `linea init` command: write the commented Linea config template.
//!
//! The template lists every network table (`mainnet`, `goerli`, their
//! `_fork` variants and `local`) with the factory values, so loading it
//! unchanged yields [`LineaConfig::default`].

use std::fs;
use std::path::Path;

use linea::config::generate_default_config;
use linea::{Error, LineaConfig};

/// Writes the template to `output`, keeping an existing file unless `force`.
///
/// # Errors
///
/// Returns [`Error::Config`] if `output` exists without `force`, or the write
/// fails.
pub fn run(output: &Path, force: bool) -> Result<(), Error> {
    if output.exists() && !force {
        return Err(Error::config(format!(
            "'{}' already exists, pass --force to replace it",
            output.display()
        )));
    }

    fs::write(output, generate_default_config())
        .map_err(|e| Error::config_with(format!("failed to write '{}'", output.display()), e))?;

    let defaults = LineaConfig::default();
    tracing::info!(
        path = %output.display(),
        default_network = %defaults.default_network,
        "wrote linea config template"
    );
    Ok(())
}
