use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("PLATER_GIT_TAG") {
        return tag;
    }

    // Not on a tag - include commit hash and branch (dev build)
    let commit = option_env!("PLATER_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("PLATER_GIT_BRANCH").unwrap_or("unknown");

    // Return a static string by leaking the formatted string
    // This is safe because it only happens once at startup
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser)]
#[command(name = "plater")]
#[command(about = "A scaffolding installer for Vue3Plate authentication")]
#[command(version = get_version(), propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the authentication scaffolding into a project
    #[command(
        after_help = "Examples:\n  plater install\n  plater install ../my-app\n  plater install --assets ./assets ../my-app"
    )]
    Install {
        /// Project root to install into (defaults to the current directory)
        target: Option<PathBuf>,
        /// Directory holding the scaffolding assets to install
        #[arg(long)]
        assets: Option<PathBuf>,
    },

    /// Check whether a project is eligible for installation
    Check {
        /// Project root to check (defaults to the current directory)
        target: Option<PathBuf>,
    },

    /// Show the current version
    Version,
}
