//! Filesystem table source
//!
//! Tables live in one directory per language:
//!
//! ```text
//! language/
//!   en/
//!     global.json
//!     user.json
//!   fr/
//!     global.json
//! ```
//!
//! If the requested language has no directory, the default language's
//! directory is read instead. A missing or malformed file is an error; there is
//! no second attempt against the default language in that case.

use crate::error::{LoadError, LoadResult};
use crate::source::{TableSource, is_safe_segment, parse_table};
use crate::{DEFAULT_LANGUAGE, TranslationTable};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads `<root>/<language>/<namespace>.json`
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    default_language: String,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_default_language(mut self, language: &str) -> Self {
        self.default_language = language.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory to read for `language`, and whether the default language
    /// was substituted for it
    async fn language_dir(&self, language: &str) -> (PathBuf, bool) {
        let language = if language.is_empty() {
            self.default_language.as_str()
        } else {
            language
        };

        let dir = self.root.join(language);
        if language == self.default_language
            || (is_safe_segment(language) && is_dir(&dir).await)
        {
            return (dir, false);
        }

        warn!(
            "Language '{}' not found. Defaulting to '{}'",
            language, self.default_language
        );
        (self.root.join(&self.default_language), true)
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

#[async_trait]
impl TableSource for FsSource {
    async fn fetch(&self, language: &str, namespace: &str) -> LoadResult<TranslationTable> {
        if !is_safe_segment(namespace) {
            return Err(LoadError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid namespace '{}'", namespace),
            )));
        }

        let (dir, _) = self.language_dir(language).await;
        let path = dir.join(format!("{}.json", namespace));
        debug!("Reading translations from {}", path.display());

        let content = tokio::fs::read_to_string(&path).await?;
        parse_table(&content).map_err(|e| match e {
            LoadError::Parse(msg) => LoadError::Parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    fn source_name(&self) -> &str {
        "filesystem"
    }
}
