use clap::Parser;
use eyre::Result;

use intake_cli::cli::{Cli, Commands};
use intake_cli::commands::{decode_command, respond_command};
use intake_cli::config::load_config;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Decode(args) => println!("{}", decode_command(args)?),
        Commands::Respond(args) => {
            let summary = respond_command(args, &config)?;
            println!(
                "wrote {} ({} bytes, {} sections)",
                args.out.display(),
                summary.bytes,
                summary.blocks
            );
        }
    }

    Ok(())
}
