use serde::Deserialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::analyzer::DEFAULT_CONCURRENCY;
use crate::args::Args;
use crate::errors::{config_error, AppError};
use tracing::info;

// Configuration location
pub const CONFIG_FILE_NAME: &str = "unmutual.toml";

const DEFAULT_API_BASE_URL: &str = "https://graph.instagram.com";

/// Fully resolved runtime configuration: file values overridden by CLI flags,
/// gaps filled interactively or by defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub handle: String,
    pub token: String,
    pub out_dir: PathBuf,
    pub include_verified: bool,
    pub concurrency: usize,
    pub api_base_url: String,
}

/// On-disk shape of `unmutual.toml`; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    handle: Option<String>,
    token: Option<String>,
    out_dir: Option<PathBuf>,
    include_verified: Option<bool>,
    concurrency: Option<usize>,
    api_base_url: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Option<FileConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("failed to read {}: {}", path.display(), e)))?;
        let parsed = toml::from_str(&content)
            .map_err(|e| config_error(format!("invalid config {}: {}", path.display(), e)))?;
        Ok(Some(parsed))
    }
}

/// Values gathered from the interactive prompt when neither a config file nor
/// a `--handle` flag is present.
#[derive(Debug, Default, PartialEq)]
struct PromptedConfig {
    handle: String,
    out_dir: PathBuf,
    include_verified: bool,
}

impl AppConfig {
    pub fn resolve(args: &Args) -> Result<AppConfig, AppError> {
        let path = args
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let file = FileConfig::load(&path)?;
        if file.is_some() {
            info!("loaded configuration from {}", path.display());
        }
        let file = file.unwrap_or_default();

        let prompted = if args.handle.is_none() && file.handle.is_none() {
            info!("no config file or --handle flag; prompting for configuration");
            Some(prompt_for_config(io::stdin().lock(), io::stdout())?)
        } else {
            None
        };

        let handle = args
            .handle
            .clone()
            .or(file.handle)
            .or_else(|| prompted.as_ref().map(|p| p.handle.clone()))
            .ok_or_else(|| config_error("no handle configured"))?;
        validate_handle(&handle)?;

        let token = args
            .token
            .clone()
            .or(file.token)
            .ok_or_else(|| config_error("no access token configured (set 'token' or --token)"))?;
        if token.trim().is_empty() {
            return Err(config_error("access token is empty"));
        }

        let out_dir = args
            .out_dir
            .clone()
            .or(file.out_dir)
            .or_else(|| prompted.as_ref().map(|p| p.out_dir.clone()))
            .unwrap_or_else(|| PathBuf::from("."));
        if !out_dir.is_dir() {
            return Err(config_error(format!(
                "output directory {} does not exist",
                out_dir.display()
            )));
        }

        let include_verified = args
            .include_verified
            .or(file.include_verified)
            .or_else(|| prompted.as_ref().map(|p| p.include_verified))
            .unwrap_or(false);

        let concurrency = args
            .concurrency
            .or(file.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(config_error("concurrency must be at least 1"));
        }

        let api_base_url = args
            .api_base_url
            .clone()
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(AppConfig {
            handle,
            token,
            out_dir,
            include_verified,
            concurrency,
            api_base_url,
        })
    }
}

fn validate_handle(handle: &str) -> Result<(), AppError> {
    if handle.is_empty() || handle.contains(' ') {
        return Err(config_error(
            "handle cannot be empty or contain spaces",
        ));
    }
    Ok(())
}

/// Interactive fallback, mirroring first-run behavior: ask for the handle,
/// the report output directory and the verified-accounts choice.
fn prompt_for_config<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<PromptedConfig, AppError> {
    let mut prompted = PromptedConfig::default();

    loop {
        write!(output, "Enter your handle: ").map_err(|e| config_error(e.to_string()))?;
        output.flush().map_err(|e| config_error(e.to_string()))?;
        let line = read_line(&mut input)?;
        let handle = line.trim();
        if !handle.is_empty() && !handle.contains(' ') {
            prompted.handle = handle.to_string();
            break;
        }
        writeln!(output, "handle cannot be empty or contain spaces.")
            .map_err(|e| config_error(e.to_string()))?;
    }

    loop {
        write!(
            output,
            "Enter the output directory for your report (empty = current directory): "
        )
        .map_err(|e| config_error(e.to_string()))?;
        output.flush().map_err(|e| config_error(e.to_string()))?;
        let line = read_line(&mut input)?;
        let dir = line.trim();
        if dir.is_empty() {
            prompted.out_dir = PathBuf::from(".");
            break;
        }
        let path = PathBuf::from(dir);
        if path.is_dir() {
            prompted.out_dir = path;
            break;
        }
        writeln!(output, "The specified directory does not exist.")
            .map_err(|e| config_error(e.to_string()))?;
    }

    write!(output, "Include verified accounts in report? (true/false): ")
        .map_err(|e| config_error(e.to_string()))?;
    output.flush().map_err(|e| config_error(e.to_string()))?;
    let line = read_line(&mut input)?;
    prompted.include_verified = line.trim() == "true";

    Ok(prompted)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, AppError> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| config_error(format!("failed to read input: {}", e)))?;
    Ok(line)
}
