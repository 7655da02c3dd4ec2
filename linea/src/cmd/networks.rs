//! `linea networks` command — list registered networks and their tunables.

use linea::chain::{NetworkKind, Registry};
use linea::{Error, LineaConfig};

/// Execute the `networks` command.
///
/// # Errors
///
/// Returns an error if registration or config lookup fails.
#[allow(clippy::print_stdout)]
pub fn run(config: &LineaConfig) -> Result<(), Error> {
    print!("{}", render(config)?);
    Ok(())
}

/// Renders one line per registered network.
fn render(config: &LineaConfig) -> Result<String, Error> {
    let registry = Registry::with_linea(config)?;
    let mut out = String::new();
    for entry in registry.networks() {
        let network = config.get(&entry.name)?;
        let kind = match entry.kind {
            NetworkKind::Live(_) => "live",
            NetworkKind::Fork(_) => "fork",
            NetworkKind::Local => "local",
        };
        let chain_id = entry
            .kind
            .chain_id()
            .map_or_else(|| "-".to_owned(), |id| id.to_string());
        let provider = entry
            .provider
            .map_or_else(|| "-".to_owned(), |provider| provider.to_string());
        out.push_str(&format!(
            "{}:{:<14} {:<6} chain_id={:<6} provider={:<5} type={} confirmations={} block_time={} gas_limit={}\n",
            entry.ecosystem,
            entry.name,
            kind,
            chain_id,
            provider,
            network.default_transaction_type.code(),
            network.required_confirmations,
            network.block_time,
            network.gas_limit,
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_network() {
        let out = render(&LineaConfig::default()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("linea:goerli "));
        assert!(lines[0].contains("chain_id=59140"));
        assert!(lines[3].starts_with("linea:mainnet-fork"));
        assert!(lines[3].contains("provider=-"));
        assert!(lines[4].contains("provider=test"));
        assert!(lines[4].contains("gas_limit=max"));
    }
}
