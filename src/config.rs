use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Content store
    pub project_id: String,
    pub dataset: String,
    pub api_url: Option<String>,
    pub api_host: String,
    pub api_version: String,
    pub cdn_host: String,

    // Comment moderation endpoint
    pub comment_endpoint_url: String,

    // Snapshot revalidation
    pub revalidate_interval: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Content store
            project_id: required_env("CONTENT_PROJECT_ID")?,
            dataset: required_env("CONTENT_DATASET")?,
            api_url: optional_env("CONTENT_API_URL"),
            api_host: env_or_default("CONTENT_API_HOST", "api.sanity.io"),
            api_version: env_or_default("CONTENT_API_VERSION", "v2021-10-21"),
            cdn_host: env_or_default("CONTENT_CDN_HOST", "cdn.sanity.io"),

            // Comment moderation endpoint
            comment_endpoint_url: required_env("COMMENT_ENDPOINT_URL")?,

            // Snapshot revalidation
            revalidate_interval: Duration::from_secs(parse_env_u64("REVALIDATE_SECS", 60)?),

            // Web server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "CONTENT_PROJECT_ID".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.dataset.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "CONTENT_DATASET".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if !self
            .dataset
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidValue {
                name: "CONTENT_DATASET".to_string(),
                message: "must contain only lowercase letters, digits, '-' or '_'".to_string(),
            });
        }
        match url::Url::parse(&self.comment_endpoint_url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            Ok(u) => {
                return Err(ConfigError::InvalidValue {
                    name: "COMMENT_ENDPOINT_URL".to_string(),
                    message: format!("unsupported scheme '{}'", u.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    name: "COMMENT_ENDPOINT_URL".to_string(),
                    message: e.to_string(),
                });
            }
        }
        if self.revalidate_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REVALIDATE_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Base URL of the content store's query API, without a trailing slash.
    ///
    /// `CONTENT_API_URL` overrides the derived
    /// `https://{project}.{host}/{version}` form; tests point this at a
    /// local mock server.
    #[must_use]
    pub fn content_api_base(&self) -> String {
        self.api_url.as_ref().map_or_else(
            || {
                format!(
                    "https://{}.{}/{}",
                    self.project_id, self.api_host, self.api_version
                )
            },
            |u| u.trim_end_matches('/').to_string(),
        )
    }

    /// A fixed configuration for tests, bypassing the environment.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            project_id: "testproj".to_string(),
            dataset: "production".to_string(),
            api_url: None,
            api_host: "api.sanity.io".to_string(),
            api_version: "v2021-10-21".to_string(),
            cdn_host: "cdn.sanity.io".to_string(),
            comment_endpoint_url: "http://127.0.0.1:9/comments".to_string(),
            revalidate_interval: Duration::from_secs(60),
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
        }
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_for_missing_vars() {
        assert_eq!(parse_env_u64("NONEXISTENT_VAR", 60).unwrap(), 60);
        assert_eq!(parse_env_u16("NONEXISTENT_VAR", 8080).unwrap(), 8080);
        assert_eq!(env_or_default("NONEXISTENT_VAR", "fallback"), "fallback");
        assert!(optional_env("NONEXISTENT_VAR").is_none());
    }

    #[test]
    fn test_validate_accepts_test_config() {
        Config::for_testing().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_project() {
        let config = Config {
            project_id: String::new(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_dataset_name() {
        let config = Config {
            dataset: "Production Data".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint_url() {
        let config = Config {
            comment_endpoint_url: "not a url".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            comment_endpoint_url: "ftp://example.com/comments".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_revalidate_interval() {
        let config = Config {
            revalidate_interval: Duration::ZERO,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_base_derived_from_project() {
        let config = Config::for_testing();
        assert_eq!(
            config.content_api_base(),
            "https://testproj.api.sanity.io/v2021-10-21"
        );
    }

    #[test]
    fn test_api_base_override_strips_trailing_slash() {
        let config = Config {
            api_url: Some("http://127.0.0.1:3999/".to_string()),
            ..Config::for_testing()
        };
        assert_eq!(config.content_api_base(), "http://127.0.0.1:3999");
    }
}
