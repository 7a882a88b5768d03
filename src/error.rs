/// Error types for the analyzer
///
/// Every failure that can reach the user is one of these. They are all
/// `Clone` because they travel inside UI messages.

use thiserror::Error;

/// Fallback shown when the service reports `success: false` without a reason
pub const APPLICATION_FALLBACK: &str = "Analysis failed";

/// Fallback shown when a transport error carries no message
pub const TRANSPORT_FALLBACK: &str = "Failed to analyze image";

/// Why a chosen or dropped file never became an upload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Dropped file is not an `image/*` MIME type
    #[error("{file_name} is not an image ({mime})")]
    NotAnImage { file_name: String, mime: String },

    /// File has no content
    #[error("{0} is empty")]
    Empty(String),

    /// File could not be read from disk
    #[error("Could not read {file_name}: {reason}")]
    Unreadable { file_name: String, reason: String },
}

/// Failure of one analysis request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Network, DNS, TLS or connection failure
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-2xx status
    #[error("Analysis service responded with {status} {reason}")]
    ServiceRejected { status: u16, reason: String },

    /// The envelope parsed but reported `success: false`
    #[error("{0}")]
    Application(String),

    /// The body was not a well-formed analysis envelope
    #[error("Malformed analysis response: {0}")]
    Malformed(String),
}

impl AnalysisError {
    /// Build a transport error, falling back to a generic message when empty
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport(TRANSPORT_FALLBACK.to_string())
        } else {
            Self::Transport(message)
        }
    }

    /// Build an application error from the envelope's optional `error` field
    pub fn application(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => Self::Application(m),
            _ => Self::Application(APPLICATION_FALLBACK.to_string()),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Invalid startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidEndpoint { var: &'static str, value: String },

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_messages_fall_back() {
        assert_eq!(AnalysisError::transport("  ").to_string(), TRANSPORT_FALLBACK);
        assert_eq!(AnalysisError::application(None).to_string(), APPLICATION_FALLBACK);
        assert_eq!(
            AnalysisError::application(Some(String::new())).to_string(),
            APPLICATION_FALLBACK
        );
    }

    #[test]
    fn test_rejected_message_names_status() {
        let err = AnalysisError::ServiceRejected {
            status: 500,
            reason: "Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "Analysis service responded with 500 Internal Server Error"
        );
    }
}
