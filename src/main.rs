use anyhow::Result;
use clap::{ColorChoice, Parser};
use folio::cli::{self, Cli, Commands};
use folio::config::SiteConfig;

fn main() -> Result<()> {
    // before anything blocks
    cli::serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
    }
}
