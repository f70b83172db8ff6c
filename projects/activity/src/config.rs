use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REDIRECT_URI: &str = "http://localhost:5173/";

/// OAuth app credentials relayed on the `/auth` exchange.
#[derive(Debug, Clone)]
pub struct GitHubOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Which upstream feeds the commit-day aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivitySource {
    /// Commit/PR search queries. The default.
    #[default]
    Search,
    /// Per-repository commit listings. Deprecated; the only source that
    /// still reports the `health` score.
    RepoScan,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub oauth: GitHubOAuthConfig,
    pub source: ActivitySource,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// `GITHUB_CLIENT_ID` and `GITHUB_CLIENT_SECRET` are required.
    /// `GITHUB_REDIRECT_URI`, `PORT` and `ACTIVITY_SOURCE` have defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = require_var("GITHUB_CLIENT_ID")?;
        let client_secret = require_var("GITHUB_CLIENT_SECRET")?;
        let redirect_uri = std::env::var("GITHUB_REDIRECT_URI")
            .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidPort { source })?,
            Err(_) => DEFAULT_PORT,
        };

        let source = match std::env::var("ACTIVITY_SOURCE") {
            Ok(raw) => raw.parse()?,
            Err(_) => ActivitySource::default(),
        };

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            oauth: GitHubOAuthConfig {
                client_id,
                client_secret,
                redirect_uri,
            },
            source,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar { name })
}

impl std::str::FromStr for ActivitySource {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "search" => Ok(Self::Search),
            "repo-scan" => Ok(Self::RepoScan),
            other => Err(ConfigError::InvalidActivitySource {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingVar: {name}")]
    MissingVar {
        name: &'static str,
    },

    #[error("InvalidPort: {source}")]
    InvalidPort {
        source: std::num::ParseIntError,
    },

    #[error("InvalidActivitySource: {value}")]
    InvalidActivitySource {
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_source_parses_known_values() {
        assert_eq!(
            "search".parse::<ActivitySource>().unwrap(),
            ActivitySource::Search
        );
        assert_eq!(
            "repo-scan".parse::<ActivitySource>().unwrap(),
            ActivitySource::RepoScan
        );
        assert!("per-repo".parse::<ActivitySource>().is_err());
    }

    #[test]
    fn search_is_the_default_source() {
        assert_eq!(ActivitySource::default(), ActivitySource::Search);
    }
}
