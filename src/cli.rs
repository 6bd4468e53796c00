//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use repocard::{ExportMode, Locale, RepositoryInput};

#[derive(Parser, Debug)]
#[command(
    name = "repocard",
    version,
    about = "Fetch a GitHub repository's public metadata and render it as a card",
    long_about = "repocard looks up a repository by owner and name (or by URL) and prints it as a \
                  card, or exports the card as a PNG image."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the metadata API
    #[arg(long, global = true, default_value = "https://api.github.com")]
    pub api_base: String,

    /// Token sent as a bearer credential (raises the API rate limit)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in milliseconds; 0 disables it
    #[arg(long, global = true, default_value_t = 30000)]
    pub timeout_ms: u64,

    /// Language for card and message text (en, zh-cn)
    #[arg(long, global = true, default_value = "en")]
    pub locale: Locale,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the card for a repository
    ///
    /// Example: repocard show octocat/Hello-World
    Show {
        #[command(flatten)]
        target: Target,

        /// Print the metadata and card as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the card and save it as a PNG
    ///
    /// Example: repocard export https://github.com/octocat/Hello-World --mode standard,simple
    Export {
        #[command(flatten)]
        target: Target,

        /// Export modes, comma separated (standard, simple)
        #[arg(long = "mode", value_delimiter = ',', default_value = "standard")]
        modes: Vec<ExportMode>,

        /// Directory the images are written to
        #[arg(long, short, default_value = ".")]
        out: PathBuf,

        /// Print a data URL instead of writing files
        #[arg(long)]
        data_url: bool,

        /// Supersampling factor
        #[arg(long, default_value_t = 2)]
        scale: u32,
    },
}

/// Which repository to use: a reference string, or --owner and --repo.
#[derive(Args, Debug)]
pub struct Target {
    /// https://github.com/owner/repo, github.com/owner/repo or owner/repo
    #[arg(conflicts_with_all = ["owner", "repo"])]
    pub reference: Option<String>,

    /// Repository owner (with --repo)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (with --owner)
    #[arg(long)]
    pub repo: Option<String>,
}

impl Target {
    pub fn input(&self) -> RepositoryInput {
        match &self.reference {
            Some(reference) => RepositoryInput::reference(reference.clone()),
            None => RepositoryInput::manual(
                self.owner.clone().unwrap_or_default(),
                self.repo.clone().unwrap_or_default(),
            ),
        }
    }
}
