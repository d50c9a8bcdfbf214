use clap::Parser;
use std::path::PathBuf;

use github_audit::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Audit a GitHub user's recent public work", long_about = None)]
pub struct Args {
    /// GitHub login to audit
    pub username: String,

    /// TOML configuration file
    #[arg(short, long, env = "GITHUB_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the JSON report and narrative
    #[arg(short, long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// Also request a written assessment from the configured model
    #[arg(long)]
    pub summarize: bool,

    /// Abort the audit after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Seed for file sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum repositories analyzed in detail
    #[arg(long)]
    pub repos: Option<usize>,

    /// Files sampled per repository
    #[arg(long)]
    pub files: Option<usize>,
}

impl Args {
    /// Flags given on the command line win over the config file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.github.random_seed = seed;
        }
        if let Some(repos) = self.repos {
            config.github.sampled_repo_count = repos;
        }
        if let Some(files) = self.files {
            config.github.sample_file_count = files;
        }
    }
}
