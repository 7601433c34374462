use crate::error::{Result, StatsError};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page size used for the repository listing. Only the first page is read.
pub const REPOS_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub languages_url: String,
}

#[derive(Clone)]
pub struct GithubClient {
    api_base: Arc<Url>,
    token: Option<Arc<String>>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create a REST client rooted at `api_base`. The token, when present, is
    /// sent as a bearer credential on every request.
    pub fn new(api_base: &str, token: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-stats"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let base = Url::parse(api_base.trim_end_matches('/'))
            .map_err(|e| StatsError::config(format!("invalid API base '{api_base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StatsError::config(format!(
                "API base '{api_base}' cannot carry a path"
            )));
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            api_base: Arc::new(base),
            token: token.filter(|t| !t.is_empty()).map(Arc::new),
            http: Arc::new(http),
        })
    }

    /// Appends each segment to the base path, percent-encoded, so a login can
    /// never introduce its own path, query or fragment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = (*self.api_base).clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Single GET with status checking. Non-2xx responses are errors; nothing is retried.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut req = self.http.get(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }

        tracing::debug!(url, "GET");
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StatsError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StatsError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Account metadata for `login`.
    pub async fn user(&self, login: &str) -> Result<GithubUser> {
        let url = self.endpoint(&["users", login]);
        self.get_json(url.as_str()).await
    }

    /// Up to 100 repositories of `login`, most recently updated first.
    pub async fn repos(&self, login: &str) -> Result<Vec<GithubRepo>> {
        let mut url = self.endpoint(&["users", login, "repos"]);
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &REPOS_PER_PAGE.to_string());
        self.get_json(url.as_str()).await
    }

    /// Language names for one repository, largest byte count first.
    pub async fn languages(&self, languages_url: &str) -> Result<Vec<String>> {
        let sizes: HashMap<String, u64> = self.get_json(languages_url).await?;
        Ok(order_languages(sizes))
    }
}

/// Orders languages by byte count descending; equal counts fall back to name order
/// so the result does not depend on map iteration order.
pub fn order_languages(sizes: HashMap<String, u64>) -> Vec<String> {
    let mut entries: Vec<(String, u64)> = sizes.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.into_iter().map(|(name, _)| name).collect()
}
