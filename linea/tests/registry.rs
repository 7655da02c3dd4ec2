//! Registration of the Linea ecosystem against a host, driven by a config
//! file on disk.

use std::io::Write;

use linea::chain::{LOCAL_NETWORK_NAME, NETWORKS, NetworkKind, ProviderKind};
use linea::config::{generate_default_config, load_config};
use linea::{LineaConfig, Registry};

#[test]
fn test_registry_from_generated_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(generate_default_config().as_bytes()).unwrap();
    let config = load_config(file.path()).unwrap();
    assert_eq!(config, LineaConfig::default());

    let registry = Registry::with_linea(&config).unwrap();
    assert_eq!(registry.networks().len(), NETWORKS.len() * 2 + 1);

    for network in &NETWORKS {
        let live = registry.network(network.name).unwrap();
        assert_eq!(live.ecosystem, "linea");
        assert_eq!(live.kind.chain_id(), Some(network.chain_id));
        assert_eq!(live.provider, Some(ProviderKind::Node));

        let fork = registry.network(&network.fork_name()).unwrap();
        assert!(matches!(fork.kind, NetworkKind::Fork(_)));
        assert_eq!(fork.provider, None);
    }

    let local = registry.network(LOCAL_NETWORK_NAME).unwrap();
    assert!(matches!(local.kind, NetworkKind::Local));
    assert_eq!(local.provider, Some(ProviderKind::Test));
    assert_eq!(registry.config(), Some(&config));
}

#[test]
fn test_registered_config_tunables() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[mainnet]\nrequired_confirmations = 4").unwrap();
    let config = load_config(file.path()).unwrap();
    let registry = Registry::with_linea(&config).unwrap();

    let registered = registry.config().unwrap();
    assert_eq!(registered.mainnet.required_confirmations, 4);
    assert_eq!(registered.goerli.required_confirmations, 1);
    assert!(registered.local.is_instant());
    assert!(registered.mainnet_fork.network.is_instant());
}
