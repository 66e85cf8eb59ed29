pub mod graph_client;
#[cfg(test)]
mod graph_client_tests;

pub use graph_client::{GraphApi, HttpGraphClient};
