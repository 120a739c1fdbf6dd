//! Configuration for building a [`Translator`](crate::Translator)
//!
//! The values can come from the host's own configuration file (the struct is
//! `Deserialize`) or from environment variables:
//!
//! | Variable                        | Field                  | Default    |
//! |---------------------------------|------------------------|------------|
//! | `MARKER_I18N_DEFAULT_LANGUAGE`  | `default_language`     | `en`       |
//! | `MARKER_I18N_LANGUAGE_DIR`      | `language_dir`         | `language` |
//! | `MARKER_I18N_BASE_URL`          | `base_url`             | unset      |
//! | `MARKER_I18N_TIMEOUT_SECS`      | `request_timeout_secs` | `30`       |
//!
//! Setting `base_url` selects the HTTP source; otherwise tables are read from
//! `language_dir`.

use crate::DEFAULT_LANGUAGE;
use crate::error::LoadResult;
use crate::source::{FsSource, HttpSource, TableSource};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_language: String,
    pub language_dir: PathBuf,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_language: DEFAULT_LANGUAGE.to_string(),
            language_dir: PathBuf::from("language"),
            base_url: None,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Read configuration from `MARKER_I18N_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(language) = lookup("MARKER_I18N_DEFAULT_LANGUAGE").filter(|v| !v.is_empty()) {
            config.default_language = language;
        }
        if let Some(dir) = lookup("MARKER_I18N_LANGUAGE_DIR").filter(|v| !v.is_empty()) {
            config.language_dir = PathBuf::from(dir);
        }
        config.base_url = lookup("MARKER_I18N_BASE_URL").filter(|v| !v.trim().is_empty());
        if let Some(raw) = lookup("MARKER_I18N_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.request_timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MARKER_I18N_TIMEOUT_SECS '{}', using {}",
                    raw, config.request_timeout_secs
                ),
            }
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The table source this configuration describes
    pub fn build_source(&self) -> LoadResult<Arc<dyn TableSource>> {
        match &self.base_url {
            Some(base_url) => Ok(Arc::new(HttpSource::new(base_url, self.request_timeout())?)),
            None => Ok(Arc::new(
                FsSource::new(self.language_dir.clone())
                    .with_default_language(&self.default_language),
            )),
        }
    }
}
