pub mod graph;

pub use graph::{Account, FolloweeReport, FollowingPage, LookupOutcome};
