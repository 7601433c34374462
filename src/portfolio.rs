//! Static portfolio content, read from a TOML file.

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub short_bio: String,
    #[serde(default)]
    pub cv_path: Option<String>,
    #[serde(default)]
    pub github_username: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Linkedin,
    Twitter,
    Email,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Github => "GitHub",
            Platform::Linkedin => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: Platform,
    pub url: String,
}

impl SocialLink {
    /// Link text without the scheme, e.g. `github.com/octo` or the bare address.
    pub fn display(&self) -> &str {
        let url = self.url.as_str();
        url.strip_prefix("mailto:")
            .or_else(|| url.strip_prefix("https://"))
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct About {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationKind {
    Education,
    Certification,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
    pub kind: EducationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Category selection for the project gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Category(String),
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(c) => project.category == *c,
        }
    }
}

impl Portfolio {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StatsError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let portfolio = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "loaded portfolio");
        Ok(portfolio)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let portfolio: Portfolio =
            toml::from_str(raw).map_err(|e| StatsError::config(e.to_string()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StatsError::config("name must not be empty"));
        }
        if !self.github_username.is_empty() {
            validate_username(&self.github_username)?;
        }
        for link in &self.social_links {
            check_url(&format!("social link {:?}", link.platform), &link.url)?;
        }
        for project in &self.projects {
            if let Some(url) = &project.url {
                check_url(&format!("project '{}'", project.title), url)?;
            }
        }
        Ok(())
    }

    /// `All` followed by each distinct project category in first-seen order.
    pub fn categories(&self) -> Vec<ProjectFilter> {
        let mut out = vec![ProjectFilter::All];
        for p in &self.projects {
            let f = ProjectFilter::Category(p.category.clone());
            if !out.contains(&f) {
                out.push(f);
            }
        }
        out
    }

    pub fn projects_in(&self, filter: &ProjectFilter) -> Vec<&Project> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn educations_of(&self, kind: EducationKind) -> Vec<&Education> {
        self.educations.iter().filter(|e| e.kind == kind).collect()
    }
}

/// GitHub logins: 1 to 39 ASCII letters, digits or single inner hyphens.
pub fn validate_username(login: &str) -> Result<()> {
    let well_formed = !login.is_empty()
        && login.len() <= 39
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !login.starts_with('-')
        && !login.ends_with('-')
        && !login.contains("--");
    if well_formed {
        Ok(())
    } else {
        Err(StatsError::config(format!("invalid GitHub username '{login}'")))
    }
}

fn check_url(what: &str, raw: &str) -> Result<()> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|e| StatsError::config(format!("{what} has invalid URL '{raw}': {e}")))
}
