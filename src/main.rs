use clap::Parser;
use std::sync::Arc;
use tracing::info;

use unmutual::analyzer::{AnalyzerOptions, ReciprocityAnalyzer};
use unmutual::args::Args;
use unmutual::clients::{GraphApi, HttpGraphClient};
use unmutual::config::AppConfig;
use unmutual::errors::AppError;
use unmutual::report;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = AppConfig::resolve(&args)?;

    let client = Arc::new(HttpGraphClient::new(
        config.api_base_url.clone(),
        config.token.clone(),
    ));

    info!("resolving account id for @{}", config.handle);
    let origin = client.resolve_account(&config.handle).await?;

    let analyzer = ReciprocityAnalyzer::new(
        Arc::clone(&client),
        AnalyzerOptions {
            include_verified: config.include_verified,
            concurrency: config.concurrency,
        },
    );
    let results = analyzer.find_non_reciprocal(&origin).await?;

    print!("{}", report::render(&origin, &results));
    let path = report::write_report(&config.out_dir, &origin, &results)?;
    info!("report written to {}", path.display());

    Ok(())
}
