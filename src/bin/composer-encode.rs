use std::process::ExitCode;

use composer_calldata::encoding::{
    catalog::GoldenFixture, evm::encoder_registry::EncoderRegistry,
    models::COMMAND_TABLE_VERSION,
};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod lib {
    pub mod cli;
}

use lib::cli::{Cli, Commands, Parser};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = EncoderRegistry::new(cli.catalog.as_deref())?;

    match cli.command {
        Commands::List => {
            for entry in registry.catalog().entries() {
                println!("{}", entry.signature());
            }
        }
        Commands::Encode { name, args } => {
            let encoded = registry.encode(&name, &args)?;
            println!("0x{}", hex::encode(encoded));
        }
        Commands::Verify { fixtures } => {
            info!(table = COMMAND_TABLE_VERSION, path = %fixtures, "verifying fixtures");
            let fixtures = GoldenFixture::load_all(&fixtures)?;
            let mismatches = registry.verify_fixtures(&fixtures);
            for mismatch in &mismatches {
                eprintln!(
                    "{}: expected {}, got {}",
                    mismatch.label, mismatch.expected, mismatch.actual
                );
            }
            if !mismatches.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
            println!("{} fixtures match", fixtures.len());
        }
    }

    Ok(ExitCode::SUCCESS)
}
