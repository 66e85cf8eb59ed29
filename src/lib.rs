pub mod analyzer;
pub mod args;
pub mod clients;
pub mod config;
pub mod errors;
pub mod report;
pub mod types;

// Re-export commonly used items for convenience
pub use analyzer::{AnalyzerOptions, ReciprocityAnalyzer};
pub use clients::{GraphApi, HttpGraphClient};
pub use config::AppConfig;
pub use errors::{AppError, GraphError};
pub use types::{Account, FolloweeReport, LookupOutcome};
