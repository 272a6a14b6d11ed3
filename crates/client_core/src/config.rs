use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::{session::StaleResponsePolicy, with_trailing_slash};

pub const DEFAULT_API_BASE_URL: &str = "https://tweet-intelligence-engine-backend.onrender.com";
pub const SETTINGS_FILE: &str = "tweet_studio.toml";
const BASE_URL_ENV_VARS: [&str; 2] = ["TWEET_API_BASE_URL", "APP__API_BASE_URL"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid api base url '{value}': {source}")]
    BaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base_url: Url,
    pub stale_responses: StaleResponsePolicy,
    /// `None` leaves timeouts to the HTTP transport.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: with_trailing_slash(
                Url::parse(DEFAULT_API_BASE_URL).expect("default base url is valid"),
            ),
            stale_responses: StaleResponsePolicy::default(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    stale_responses: Option<StaleResponsePolicy>,
    request_timeout_secs: Option<u64>,
}

pub fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let url = Url::parse(raw.trim()).map_err(|source| SettingsError::BaseUrl {
        value: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme(raw.to_string()));
    }
    Ok(with_trailing_slash(url))
}

/// Defaults, then `tweet_studio.toml` in the working directory, then env.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if let Some(v) = file_cfg.api_base_url {
                settings.api_base_url = parse_base_url(&v)?;
            }
            if let Some(v) = file_cfg.stale_responses {
                settings.stale_responses = v;
            }
            if let Some(secs) = file_cfg.request_timeout_secs {
                settings.request_timeout = Some(Duration::from_secs(secs));
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    for name in BASE_URL_ENV_VARS {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = parse_base_url(&v)?;
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
