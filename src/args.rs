use clap::Parser;
use std::path::PathBuf;

/// unmutual - report accounts you follow who do not follow you back
#[derive(Parser, Debug)]
#[command(name = "unmutual")]
#[command(about = "Audits your following list and reports non-reciprocal follows")]
pub struct Args {
    /// Handle of the account to audit
    #[arg(long)]
    pub handle: Option<String>,

    /// API access token
    #[arg(long)]
    pub token: Option<String>,

    /// Directory the report file is written to
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Whether verified accounts are checked and reported (true/false)
    #[arg(long)]
    pub include_verified: Option<bool>,

    /// Maximum number of concurrent reverse lookups
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Path to the configuration file (default: ./unmutual.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the follow-graph API
    #[arg(long)]
    pub api_base_url: Option<String>,
}
