pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
/// Encode composer router commands by name
///
/// Every encoder is addressed by its catalog name, e.g. `encodeTransferIn`. Arguments are
/// passed as strings in catalog order: addresses and bytes as hex, integers as decimal or `0x`
/// hex, booleans as `true`/`false`. Empty bytes are written `0x`.
///
/// Logs go to stderr and are filtered through `RUST_LOG` (default `info`).
pub struct Cli {
    /// Function catalog to type arguments with. Defaults to the embedded catalog.
    #[arg(long, global = true, env = "COMPOSER_CATALOG")]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the signature of every available encoder
    List,
    /// Encode one call and print the bytes as 0x hex
    Encode {
        /// Catalog name of the encoder
        name: String,
        /// Arguments in catalog order
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Replay golden fixtures and report mismatches
    Verify {
        /// Fixture file with name, args and expected hex per case
        #[arg(
            long,
            env = "COMPOSER_FIXTURES",
            default_value = "tests/fixtures/golden_outputs.json"
        )]
        fixtures: String,
    },
}
