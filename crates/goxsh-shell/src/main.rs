/*
[INPUT]:  Interactive operator session on a terminal
[OUTPUT]: Running shell loop against the exchange API
[POS]:    Binary entry point
[UPDATE]: When changing startup flow or logging setup
*/

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use goxsh_adapter::GoxClient;
use goxsh_shell::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing()?;

    let client = GoxClient::new().context("initialize exchange client")?;

    println!("Welcome to goxsh!");
    println!("Type 'help' to get started.");

    let mut shell = Shell::new(client);
    shell.run().await;

    Ok(())
}

fn init_tracing() -> Result<()> {
    // Logs go to stderr so the prompt and command output stay clean;
    // RUST_LOG overrides the default level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
