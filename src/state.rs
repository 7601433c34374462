use crate::aggregate::{ProfileStats, aggregate};
use crate::github::GithubClient;
use crate::stats::{Stats, TopRepo};
use serde::Serialize;

/// Result holder for the GitHub section of the page. Starts empty and loading,
/// is filled once by [`GithubSection::load`], and is handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubSection {
    pub stats: Option<Stats>,
    pub top_repos: Vec<TopRepo>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatItem {
    pub label: &'static str,
    pub value: u64,
}

impl Default for GithubSection {
    fn default() -> Self {
        Self {
            stats: None,
            top_repos: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

impl GithubSection {
    pub async fn load(client: &GithubClient, username: &str) -> Self {
        let mut section = Self::default();
        let username = username.trim();
        if username.is_empty() {
            tracing::debug!("No GitHub username configured; skipping fetch");
            section.is_loading = false;
            return section;
        }

        section.apply(username, aggregate(client, username).await);
        section
    }

    /// Stores a pipeline outcome, substituting zeroed stats on failure.
    pub fn apply(&mut self, username: &str, outcome: crate::Result<ProfileStats>) {
        match outcome {
            Ok(ProfileStats { stats, top_repos }) => {
                self.stats = Some(stats);
                self.top_repos = top_repos;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching GitHub data: {e}");
                self.stats = Some(Stats::fallback(username));
                self.top_repos = Vec::new();
                self.error = Some(e.to_string());
            }
        }
        self.is_loading = false;
    }

    /// The four overview tiles. Unset stats read as zero.
    pub fn stat_items(&self) -> [StatItem; 4] {
        let s = self.stats.as_ref();
        [
            StatItem {
                label: "Repositories",
                value: s.map_or(0, |s| s.public_repos),
            },
            StatItem {
                label: "Stars",
                value: s.map_or(0, |s| s.total_stars),
            },
            StatItem {
                label: "Contributions",
                value: s.map_or(0, |s| s.total_contributions),
            },
            StatItem {
                label: "Followers",
                value: s.map_or(0, |s| s.followers),
            },
        ]
    }
}
