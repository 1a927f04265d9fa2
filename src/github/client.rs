// Thin async client over the GitHub REST v3 API. Every call returns the
// decoded payload together with the rate-limit snapshot from the response
// headers so callers can surface quota state without a second request.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::models::{RateLimit, Repository, SearchUsersResponse, UserProfile, UserSuggestion};
use crate::config::GitHubConfig;
use crate::error::{Result, ScoutError};

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("rate limit exceeded")]
    RateLimited { reset: Option<DateTime<Utc>> },

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ScoutError::Config(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(GitHubError::from)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /search/users?q={query}`. The query is percent-encoded; GitHub
    /// caps uncredentialed search at 10 requests per minute, which is why
    /// the rate-limit snapshot rides along with every result.
    pub async fn search_users(
        &self,
        query: &str,
    ) -> std::result::Result<(Vec<UserSuggestion>, Option<RateLimit>), GitHubError> {
        let url = self.search_users_url(query);
        let (response, rate) = self.get(&url, "user search").await?;
        let body: SearchUsersResponse = decode(response).await?;
        Ok((body.items, rate))
    }

    /// `GET /users/{login}`.
    pub async fn fetch_user(
        &self,
        login: &str,
    ) -> std::result::Result<(UserProfile, Option<RateLimit>), GitHubError> {
        let url = format!("{}/users/{}", self.base_url, login);
        let (response, rate) = self.get(&url, &format!("user '{login}'")).await?;
        let profile: UserProfile = decode(response).await?;
        Ok((profile, rate))
    }

    /// `GET /users/{login}/repos`.
    pub async fn fetch_repos(
        &self,
        login: &str,
    ) -> std::result::Result<(Vec<Repository>, Option<RateLimit>), GitHubError> {
        let url = format!("{}/users/{}/repos", self.base_url, login);
        let (response, rate) = self.get(&url, &format!("repositories of '{login}'")).await?;
        let repos: Vec<Repository> = decode(response).await?;
        Ok((repos, rate))
    }

    fn search_users_url(&self, query: &str) -> String {
        format!("{}/search/users?q={}", self.base_url, urlencoding::encode(query))
    }

    async fn get(
        &self,
        url: &str,
        resource: &str,
    ) -> std::result::Result<(reqwest::Response, Option<RateLimit>), GitHubError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let rate = parse_rate_limit(response.headers());
        let status = response.status();

        match status {
            StatusCode::OK => Ok((response, rate)),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource: resource.to_string(),
            }),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if rate.map(|r| r.is_exhausted()).unwrap_or(status == StatusCode::TOO_MANY_REQUESTS) =>
            {
                Err(GitHubError::RateLimited {
                    reset: rate.map(|r| r.reset),
                })
            }
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(GitHubError::Api {
                    status: status.as_u16(),
                    message: summarize_body(&message),
                })
            }
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, GitHubError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| GitHubError::Decode(e.to_string()))
}

fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimit> {
    let limit = header_number(headers, "x-ratelimit-limit")?;
    let remaining = header_number(headers, "x-ratelimit-remaining")?;
    let reset_epoch: i64 = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse().ok()?;
    let reset = DateTime::<Utc>::from_timestamp(reset_epoch, 0)?;
    Some(RateLimit {
        limit,
        remaining,
        reset,
    })
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// GitHub error bodies are JSON blobs; keep the first line at a loggable size.
fn summarize_body(body: &str) -> String {
    let line = body.lines().next().unwrap_or_default();
    if line.len() > 200 {
        let mut cut = 200;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &line[..cut])
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_config() -> GitHubConfig {
        GitHubConfig {
            api_url: "https://api.github.com/".to_string(),
            user_agent: "octoscout-tests".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_client_construction_without_token() {
        let client = GitHubClient::new(&test_config(), None).unwrap();
        assert_eq!(client.base_url, "https://api.github.com");
    }

    #[test]
    fn test_client_construction_with_token() {
        assert!(GitHubClient::new(&test_config(), Some("ghp_abc123")).is_ok());
    }

    #[test]
    fn test_client_rejects_malformed_token() {
        let result = GitHubClient::new(&test_config(), Some("bad\ntoken"));
        assert!(matches!(result, Err(ScoutError::Config(_))));
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let client = GitHubClient::new(&test_config(), None).unwrap();
        assert_eq!(
            client.search_users_url("linus torvalds"),
            "https://api.github.com/search/users?q=linus%20torvalds"
        );
        assert_eq!(
            client.search_users_url("tom&jerry"),
            "https://api.github.com/search/users?q=tom%26jerry"
        );
    }

    #[test]
    fn test_parse_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("60"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("41"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1717243200"));

        let rate = parse_rate_limit(&headers).unwrap();
        assert_eq!(rate.limit, 60);
        assert_eq!(rate.remaining, 41);
        assert_eq!(rate.reset.timestamp(), 1717243200);
        assert!(!rate.is_exhausted());
    }

    #[test]
    fn test_parse_rate_limit_requires_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("60"));
        assert!(parse_rate_limit(&headers).is_none());
    }

    #[test]
    fn test_summarize_body_truncates_long_lines() {
        let long = "x".repeat(300);
        let summary = summarize_body(&long);
        assert_eq!(summary.len(), 203);
        assert!(summary.ends_with("..."));
        assert_eq!(summarize_body("{\"message\":\"Not Found\"}"), "{\"message\":\"Not Found\"}");
    }

    #[test]
    fn test_summarize_body_respects_char_boundaries() {
        // 100 three-byte chars: byte 200 falls inside a character.
        let wide = "日".repeat(100);
        let summary = summarize_body(&wide);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.trim_end_matches("..."), "日".repeat(66));
    }

    #[tokio::test]
    #[ignore = "hits api.github.com"]
    async fn test_live_user_search() {
        let client = GitHubClient::new(&GitHubConfig::default(), None).unwrap();
        let (users, rate) = client.search_users("octocat").await.unwrap();
        assert!(users.iter().any(|u| u.login == "octocat"));
        assert!(rate.is_some());
    }
}
