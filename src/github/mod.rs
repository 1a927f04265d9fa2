// GitHub REST API access: typed models, a thin reqwest client, and the
// fetch manager that owns debounce scheduling and response generations.

mod client;
mod fetch;
mod models;

pub use client::{GitHubClient, GitHubError};
pub use fetch::{FetchEvent, FetchManager};
pub use models::{License, RateLimit, Repository, SearchUsersResponse, UserProfile, UserSuggestion};
