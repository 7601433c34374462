use crate::github::{GithubRepo, GithubUser};
use serde::Serialize;
use url::Url;

/// Number of repositories kept for the detailed language lookup.
pub const TOP_REPO_LIMIT: usize = 4;

/// Languages shown per repository card.
pub const DISPLAY_LANGUAGES: usize = 3;

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

const GITHUB_WEB_BASE: &str = "https://github.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub public_repos: u64,
    pub followers: u64,
    pub total_stars: u64,
    pub total_contributions: u64,
}

impl Stats {
    pub fn from_user(user: &GithubUser, repos: &[GithubRepo]) -> Self {
        let stars = total_stars(repos);
        Self {
            username: user.login.clone(),
            name: user
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| user.login.clone()),
            avatar_url: user.avatar_url.clone(),
            profile_url: user.html_url.clone(),
            public_repos: user.public_repos,
            followers: user.followers,
            total_stars: stars,
            total_contributions: synthesized_contributions(repos.len() as u64, stars),
        }
    }

    /// Zero-valued record shown when the account could not be fetched.
    pub fn fallback(username: &str) -> Self {
        Self {
            username: username.to_string(),
            name: username.to_string(),
            avatar_url: String::new(),
            profile_url: profile_url(username),
            public_repos: 0,
            followers: 0,
            total_stars: 0,
            total_contributions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub languages: Vec<String>,
}

impl TopRepo {
    pub fn from_repo(repo: &GithubRepo, languages: Vec<String>) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
            description: repo.description.clone(),
            url: repo.html_url.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            languages,
        }
    }

    pub fn display_languages(&self) -> &[String] {
        let n = self.languages.len().min(DISPLAY_LANGUAGES);
        &self.languages[..n]
    }
}

/// Public profile page for `username`, with the login as a single encoded segment.
pub fn profile_url(username: &str) -> String {
    match Url::parse(GITHUB_WEB_BASE) {
        Ok(mut url) => {
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().push(username);
            }
            url.into()
        }
        Err(_) => format!("{GITHUB_WEB_BASE}{username}"),
    }
}

pub fn total_stars(repos: &[GithubRepo]) -> u64 {
    repos
        .iter()
        .fold(0u64, |sum, r| sum.saturating_add(r.stargazers_count))
}

/// Presentation heuristic, not a measured figure: `repos * 25 + stars * 3`.
pub fn synthesized_contributions(repo_count: u64, total_stars: u64) -> u64 {
    repo_count
        .saturating_mul(25)
        .saturating_add(total_stars.saturating_mul(3))
}

/// The `n` most-starred repositories. The sort is stable, so equal star counts
/// keep the listing's most-recently-updated order.
pub fn rank_top(repos: &[GithubRepo], n: usize) -> Vec<GithubRepo> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sorted.truncate(n);
    sorted
}

/// A fetched, non-empty language list wins; otherwise the repository's primary
/// language, or "Unknown" when none is recorded.
pub fn resolve_languages<E>(
    fetched: std::result::Result<Vec<String>, E>,
    primary: Option<&str>,
) -> Vec<String> {
    match fetched {
        Ok(langs) if !langs.is_empty() => langs,
        _ => vec![
            primary
                .filter(|p| !p.is_empty())
                .unwrap_or(UNKNOWN_LANGUAGE)
                .to_string(),
        ],
    }
}
