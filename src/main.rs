mod cli;
mod copier;
mod installer;
mod manifest;
mod patcher;
mod paths;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use installer::{InstallOutcome, Installer};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli)?;

    match cli.command {
        Commands::Version => {
            println!("plater v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::Check { target } => {
            let root = target.unwrap_or_else(|| PathBuf::from("."));
            match manifest::probe(&root) {
                Ok(eligibility) if eligibility.is_eligible() => {
                    println!("{} {}", style("✓").green().bold(), eligibility);
                }
                Ok(eligibility) => {
                    println!("{} {}", style("✗").red().bold(), eligibility);
                    std::process::exit(1);
                }
                Err(e) => {
                    tracing::error!("Check failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Install { target, assets } => {
            let root = target.unwrap_or_else(|| PathBuf::from("."));
            let asset_root = match paths::resolve_assets(assets) {
                Ok(dir) => dir,
                Err(e) => {
                    tracing::error!("{}", e);
                    std::process::exit(1);
                }
            };

            let installer = Installer::new(root, asset_root);
            match installer.run() {
                // Ineligible targets halt gracefully: nothing was written,
                // so there is nothing to report as a failure.
                Ok(InstallOutcome::Installed) | Ok(InstallOutcome::Ineligible(_)) => {}
                Err(e) => {
                    tracing::error!("Installation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}
