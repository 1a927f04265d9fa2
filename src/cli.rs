use clap::Parser;

/// octoscout: search GitHub users and browse their repositories from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "octoscout")]
#[command(version)]
#[command(about = "Search GitHub users and browse their repositories", long_about = None)]
pub struct Cli {
    /// Start with this search query already in the box
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// GitHub API token, raises the rate limit. Unauthenticated works too.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Theme to start in (light or dark); overrides theme.toml
    #[arg(long, value_name = "MODE")]
    pub theme: Option<String>,

    /// Milliseconds to wait after the last keystroke before searching
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Read configuration from this directory instead of the platform default
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<std::path::PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_defaults() {
        std::env::remove_var("GITHUB_TOKEN");
        let cli = Cli::parse_from(["octoscout"]);
        assert!(cli.query.is_none());
        assert!(cli.token.is_none());
        assert!(cli.theme.is_none());
        assert!(cli.debounce_ms.is_none());
        assert_eq!(cli.log_level, "info");
        assert!(cli.config_dir.is_none());
    }

    #[test]
    #[serial]
    fn test_token_falls_back_to_env() {
        std::env::set_var("GITHUB_TOKEN", "ghp_test");
        let cli = Cli::parse_from(["octoscout"]);
        assert_eq!(cli.token, Some("ghp_test".to_string()));
        std::env::remove_var("GITHUB_TOKEN");
    }

    #[test]
    fn test_positional_query() {
        let cli = Cli::parse_from(["octoscout", "torvalds"]);
        assert_eq!(cli.query.as_deref(), Some("torvalds"));
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::parse_from([
            "octoscout",
            "--theme",
            "light",
            "--debounce-ms",
            "150",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.theme.as_deref(), Some("light"));
        assert_eq!(cli.debounce_ms, Some(150));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_config_dir_flag() {
        let cli = Cli::parse_from(["octoscout", "--config-dir", "/tmp/octoscout-test"]);
        assert_eq!(
            cli.config_dir,
            Some(std::path::PathBuf::from("/tmp/octoscout-test"))
        );
    }
}
