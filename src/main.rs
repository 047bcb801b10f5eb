mod cli;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "campaign-save", version, about, next_line_help(false))]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: cli::Subcommands,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli::run(&cli.subcommand)?;
    Ok(())
}
