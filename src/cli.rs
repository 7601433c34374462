use crate::error::Result;
use crate::github::DEFAULT_API_BASE;
use crate::portfolio::validate_username;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "folio-stats")]
#[command(about = "Render a portfolio card with live GitHub statistics")]
pub struct Args {
    /// Portfolio content file
    #[arg(long, short, default_value = "portfolio.toml")]
    pub config: PathBuf,

    /// Overrides `github_username` from the portfolio file
    #[arg(long, short)]
    pub username: Option<String>,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Optional token; raises the unauthenticated rate limit
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write the fetched section as stats.json
    #[arg(long)]
    pub json: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Args {
    /// The override, checked like the portfolio field, or the configured login.
    pub fn username<'a>(&'a self, configured: &'a str) -> Result<&'a str> {
        match self.username.as_deref() {
            Some(login) => {
                validate_username(login)?;
                Ok(login)
            }
            None => Ok(configured),
        }
    }
}
