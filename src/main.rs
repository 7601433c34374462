use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use folio_stats::cli::Args;
use folio_stats::svg::{self, Theme};
use folio_stats::{GithubClient, GithubSection, Portfolio, logger};
use std::fs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let portfolio = Portfolio::load(&args.config)
        .with_context(|| format!("Failed to load portfolio from {}", args.config.display()))?;

    let client = GithubClient::new(&args.api_base, args.token.clone())
        .context("Failed to build GitHub client")?;
    let username = args
        .username(&portfolio.github_username)
        .context("Invalid --username")?;
    let section = GithubSection::load(&client, username).await;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let today = Utc::now().date_naive();
    for theme in [Theme::Dark, Theme::Light] {
        let path = args.out_dir.join(theme.file_name());
        let svg = svg::generate_svg(&portfolio, &section, today, theme);
        fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    if args.json {
        let path = args.out_dir.join("stats.json");
        let json = serde_json::to_string_pretty(&section)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    if let Some(err) = &section.error {
        tracing::warn!("Rendered fallback GitHub stats: {err}");
    }

    Ok(())
}
