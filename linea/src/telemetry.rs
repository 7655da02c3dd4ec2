//! Console logging setup.
//!
//! Provides [`Telemetry`] for installing a `tracing` subscriber. Only
//! available with the `telemetry` feature. Output goes to stderr so command
//! results on stdout stay machine-readable.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Service identity and log filter for the subscriber.
///
/// `RUST_LOG` overrides the configured log level when set.
#[derive(Debug, Default)]
pub struct Telemetry {
    name: Option<String>,
    version: Option<String>,
    log_level: Option<String>,
}

impl Telemetry {
    /// Creates a new, empty [`Telemetry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the service version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the log level filter used when `RUST_LOG` is not set.
    ///
    /// Accepts any valid [`EnvFilter`] directive string (e.g. `"debug"`,
    /// `"linea=trace"`).
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Directive used when `RUST_LOG` is absent or invalid.
    fn fallback_directive(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Installs the global subscriber.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn register(self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.fallback_directive()));
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(
                name = self.name.as_deref().unwrap_or(env!("CARGO_PKG_NAME")),
                version = self.version.as_deref().unwrap_or(env!("CARGO_PKG_VERSION")),
                "console logging registered"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_directive() {
        assert_eq!(Telemetry::new().fallback_directive(), "info");
        assert_eq!(
            Telemetry::new().with_log_level("linea=trace").fallback_directive(),
            "linea=trace"
        );
    }

    #[test]
    fn test_register_twice_is_harmless() {
        Telemetry::new().with_name("linea-test").register();
        Telemetry::new().register();
    }
}
