// Wire types for the GitHub REST v3 endpoints we consume. Fields the UI
// never reads are left out; serde ignores the rest of the payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry from `GET /search/users`. The search index returns a trimmed
/// user record, so only the fields it reliably carries live here.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserSuggestion {
    pub id: u64,
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Envelope for `GET /search/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersResponse {
    #[serde(default)]
    pub items: Vec<UserSuggestion>,
}

/// Full user record from `GET /users/{login}`. GitHub nulls out profile
/// fields the user never filled in, hence the Options.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Display name for headings: the real name when set, else the login.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// One repository from `GET /users/{login}/repos`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub license: Option<License>,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct License {
    pub name: String,
}

/// Snapshot of the `X-RateLimit-*` response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    pub reset: DateTime<Utc>,
}

impl RateLimit {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}
