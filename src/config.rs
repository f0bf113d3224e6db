//! Environment configuration

use crate::state_machine::Article;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat_article";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ARTICLE_TITLE: &str = "Untitled article";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("Cannot read article from {}: {source}", path.display())]
    ReadArticle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runtime configuration for the widget server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Answering service URL
    pub endpoint: String,
    /// Upper bound on one backend call
    pub request_timeout: Duration,
    pub port: u16,
    pub article_title: String,
    /// File holding the article body
    pub article_content_path: Option<PathBuf>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            port: DEFAULT_PORT,
            article_title: DEFAULT_ARTICLE_TITLE.to_string(),
            article_content_path: None,
        }
    }
}

impl ChatConfig {
    /// Read the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset or blank variables use defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero or non-numeric timeout,
    /// or a port outside `u16`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = match get("ARTICLE_CHAT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_timeout(&raw)?),
            None => defaults.request_timeout,
        };

        let port = match get("ARTICLE_CHAT_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidValue {
                    var: "ARTICLE_CHAT_PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.port,
        };

        Ok(Self {
            endpoint: get("ARTICLE_CHAT_ENDPOINT").unwrap_or(defaults.endpoint),
            request_timeout,
            port,
            article_title: get("ARTICLE_TITLE").unwrap_or(defaults.article_title),
            article_content_path: get("ARTICLE_CONTENT_PATH").map(PathBuf::from),
        })
    }

    /// Read the article the widget is attached to
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadArticle`] if the content file cannot be read.
    pub fn load_article(&self) -> Result<Article, ConfigError> {
        let content = match &self.article_content_path {
            Some(path) => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::ReadArticle {
                    path: path.clone(),
                    source,
                })?
            }
            None => String::new(),
        };
        Ok(Article::new(self.article_title.clone(), content))
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        var: "ARTICLE_CHAT_TIMEOUT_SECS",
        value: raw.to_string(),
        reason,
    };
    let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(secs)
}
