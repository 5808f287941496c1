// File: cli/src/main.rs
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::commands::{execute, Cli};
use cli::{ClientConfig, HeketiClient};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("cli=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env_with_server(cli.server.as_deref())?;
    let client = HeketiClient::new(config)?;

    let output = execute(&cli.command, &client, cli.json).await?;
    println!("{}", output);

    Ok(())
}
