//! Linea CLI
//!
//! Inspects the Linea network registry and normalizes transaction requests
//! from the command line.
//!
//! ```sh
//! linea init                                  # Generate default linea.toml
//! linea networks                              # List registered networks
//! linea tx --network local '{"type": 0}'      # Normalize a request
//! linea encode --to 0x.. --sig 'fooAndBar()'  # Encode a contract call
//! ```

mod cmd;

use clap::Parser;
use cmd::{Cli, Commands};

#[allow(clippy::print_stderr)]
fn main() {
    dotenvy::dotenv().ok();

    #[cfg(feature = "telemetry")]
    linea::telemetry::Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_log_level("warn")
        .register();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force),
        Commands::Networks { config } => config.load().and_then(|c| cmd::networks::run(&c)),
        Commands::Tx {
            config,
            provider,
            fields,
        } => config.load().and_then(|c| {
            let context = provider.context()?;
            cmd::tx::run(c, context.as_ref(), &fields)
        }),
        Commands::Encode {
            config,
            provider,
            to,
            sig,
            fields,
            args,
        } => config.load().and_then(|c| {
            let context = provider.context()?;
            cmd::tx::run_encode(c, context.as_ref(), to, &sig, &args, &fields)
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
