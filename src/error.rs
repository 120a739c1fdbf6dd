/// Error types for loading translation tables
///
/// These never reach the caller of `Translator::translate`: the store logs
/// them and substitutes an empty table. They are public so that custom
/// `TableSource` implementations can report failures.
#[derive(Debug)]
pub enum LoadError {
    /// Reading a table from disk failed (missing file, permissions, ...)
    Io(std::io::Error),
    /// The table was read but is not a JSON object of strings
    Parse(String),
    /// The HTTP request could not be completed
    Network(String),
    /// The server answered with a non-success status
    Status(u16),
    /// The source could not be constructed from the given configuration
    Config(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "I/O error: {}", err),
            LoadError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LoadError::Network(msg) => write!(f, "Network error: {}", msg),
            LoadError::Status(code) => write!(f, "Unexpected HTTP status: {}", code),
            LoadError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LoadError::Status(status.as_u16()),
            None => LoadError::Network(err.to_string()),
        }
    }
}

/// Result type for table loading
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            LoadError::Parse("root must be an object".to_string()).to_string(),
            "Parse error: root must be an object"
        );
        assert_eq!(LoadError::Status(404).to_string(), "Unexpected HTTP status: 404");
    }

    #[test]
    fn test_from_io_error_keeps_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LoadError = io.into();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LoadError = json_err.into();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
