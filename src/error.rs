// Error types - some variants for future error conditions

#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

use crate::github::GitHubError;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Terminal initialization failed: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("GitHub API error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ScoutError>;
