//! Fetch-aggregate-rank pipeline for one account.
//!
//! Metadata and the repository listing are fetched one after the other and
//! either failing fails the whole run. The language lookups for the top
//! repositories run concurrently and a failing lookup only degrades that one
//! repository to its primary language.

use crate::error::Result;
use crate::github::GithubClient;
use crate::stats::{Stats, TOP_REPO_LIMIT, TopRepo, rank_top, resolve_languages};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub stats: Stats,
    pub top_repos: Vec<TopRepo>,
}

pub async fn aggregate(client: &GithubClient, username: &str) -> Result<ProfileStats> {
    let user = client.user(username).await?;
    let repos = client.repos(username).await?;
    tracing::debug!(username, repos = repos.len(), "fetched account and repositories");

    let stats = Stats::from_user(&user, &repos);
    let top = rank_top(&repos, TOP_REPO_LIMIT);

    let handles: Vec<_> = top
        .iter()
        .map(|repo| {
            let client = client.clone();
            let url = repo.languages_url.clone();
            tokio::spawn(async move { client.languages(&url).await })
        })
        .collect();

    let mut top_repos = Vec::with_capacity(top.len());
    for (repo, handle) in top.iter().zip(handles) {
        let fetched = match handle.await {
            Ok(Ok(langs)) => Ok(langs),
            Ok(Err(e)) => {
                tracing::warn!("Failed to fetch languages for {}: {e}", repo.name);
                Err(())
            }
            Err(e) => {
                tracing::warn!("Language lookup for {} did not complete: {e}", repo.name);
                Err(())
            }
        };
        let languages = resolve_languages(fetched, repo.language.as_deref());
        top_repos.push(TopRepo::from_repo(repo, languages));
    }

    tracing::info!(
        username,
        total_stars = stats.total_stars,
        top_repos = top_repos.len(),
        "aggregated GitHub stats"
    );

    Ok(ProfileStats { stats, top_repos })
}
