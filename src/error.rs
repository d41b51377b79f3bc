use thiserror::Error;

/// Unified error type for release tracking operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Unexpected registry response: {message}\nRaw response: {body}")]
    RegistryData { message: String, body: String },

    #[error("No baseline version found: no local tag matches the release pattern")]
    NoBaseline,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in image-release-tracker
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Create an authentication error with context
    pub fn auth(msg: impl Into<String>) -> Self {
        TrackerError::Auth(msg.into())
    }

    /// Create a registry data error carrying the raw response body
    pub fn registry_data(msg: impl Into<String>, body: impl Into<String>) -> Self {
        TrackerError::RegistryData {
            message: msg.into(),
            body: body.into(),
        }
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        TrackerError::Branch(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TrackerError::Tag(msg.into())
    }

    /// Create a remote operation error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        TrackerError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TrackerError::Config(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        TrackerError::Template(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_registry_data_includes_raw_body() {
        let err = TrackerError::registry_data(
            "missing 'tags' field",
            r#"{"errors":[{"code":"NAME_UNKNOWN"}]}"#,
        );
        let msg = err.to_string();
        assert!(msg.contains("missing 'tags' field"));
        assert!(msg.contains("NAME_UNKNOWN"));
    }

    #[test]
    fn test_no_baseline_is_descriptive() {
        let msg = TrackerError::NoBaseline.to_string();
        assert!(msg.contains("No baseline version found"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TrackerError::auth("x"), "Authentication failed"),
            (TrackerError::branch("x"), "Branch error"),
            (TrackerError::tag("x"), "Tag error"),
            (TrackerError::remote("x"), "Remote operation failed"),
            (TrackerError::config("x"), "Configuration error"),
            (TrackerError::template("x"), "Template error"),
            (TrackerError::registry_data("x", "{}"), "Unexpected registry response"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_git_error_conversion() {
        let err: TrackerError = git2::Error::from_str("reference not found").into();
        assert!(err.to_string().contains("Git operation failed"));
    }
}
