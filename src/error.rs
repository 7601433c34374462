use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl StatsError {
    pub fn config(message: impl Into<String>) -> Self {
        StatsError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
