//! The `vaultgraf` binary.

use clap::Parser;
use vaultgraf_cli::{CliArgs, VaultgrafCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let result = match VaultgrafCli::from_args("vaultgraf", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
