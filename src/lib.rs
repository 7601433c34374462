pub mod aggregate;
pub mod cli;
pub mod error;
pub mod github;
pub mod logger;
pub mod portfolio;
pub mod state;
pub mod stats;
pub mod svg;

pub use aggregate::{ProfileStats, aggregate};
pub use error::{Result, StatsError};
pub use github::GithubClient;
pub use portfolio::Portfolio;
pub use state::GithubSection;
pub use stats::{Stats, TopRepo};
