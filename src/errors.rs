use thiserror::Error;

/// Which stage of the chat completion command failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required flags or configuration values were missing.
    Config,
    /// The API client could not be constructed.
    Client,
    /// The remote call failed.
    Call,
    /// Writing the report failed.
    Output,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing required flag --{0}")]
    MissingFlag(&'static str),

    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to send request to Azure OpenAI: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Azure OpenAI returned {status}{}: {message}", code_suffix(.code))]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("failed to serialize chat request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default()
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::MissingFlag(_) => ErrorKind::Config,
            CommandError::InvalidEndpoint { .. } | CommandError::ClientBuild(_) => ErrorKind::Client,
            CommandError::Encode(_)
            | CommandError::Transport(_)
            | CommandError::Service { .. }
            | CommandError::Decode(_) => ErrorKind::Call,
            CommandError::Output(_) => ErrorKind::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_includes_code() {
        let err = CommandError::Service {
            status: 429,
            code: Some("429".to_string()),
            message: "Rate limit exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Azure OpenAI returned 429 (429): Rate limit exceeded"
        );
        assert_eq!(err.kind(), ErrorKind::Call);
    }

    #[test]
    fn test_service_error_display_without_code() {
        let err = CommandError::Service {
            status: 500,
            code: None,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Azure OpenAI returned 500: boom");
    }

    #[test]
    fn test_encode_error_names_the_request() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = CommandError::Encode(source);
        assert!(err.to_string().starts_with("failed to serialize chat request"));
        assert!(!err.to_string().contains("response"));
        assert_eq!(err.kind(), ErrorKind::Call);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            CommandError::MissingFlag("azureOpenAIKey").kind(),
            ErrorKind::Config
        );
        let invalid = CommandError::InvalidEndpoint {
            endpoint: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(invalid.kind(), ErrorKind::Client);
    }
}
