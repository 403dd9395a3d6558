use thiserror::Error;

#[derive(Error, Debug)]
pub enum JaneError {
    #[error("JANE request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("JANE returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Unexpected response shape: {message}")]
    DecodeError { message: String },

    #[error("Malformed {record} #{index}: field '{field}' {reason}")]
    FieldParseError {
        record: &'static str,
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Transport,
    Decode,
    Parse,
    Config,
}

impl ErrorStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStage::Transport => "transport",
            ErrorStage::Decode => "decode",
            ErrorStage::Parse => "parse",
            ErrorStage::Config => "config",
        }
    }
}

impl JaneError {
    pub fn decode(message: impl Into<String>) -> Self {
        JaneError::DecodeError {
            message: message.into(),
        }
    }

    pub fn stage(&self) -> ErrorStage {
        match self {
            JaneError::TransportError(_) | JaneError::HttpStatusError { .. } => {
                ErrorStage::Transport
            }
            JaneError::DecodeError { .. } => ErrorStage::Decode,
            JaneError::FieldParseError { .. } => ErrorStage::Parse,
            JaneError::IoError(_)
            | JaneError::ConfigError { .. }
            | JaneError::InvalidConfigValueError { .. }
            | JaneError::MissingConfigError { .. } => ErrorStage::Config,
        }
    }

    /// Short plain-text apology shown to users instead of the raw error.
    pub fn user_message(&self) -> &'static str {
        match self.stage() {
            ErrorStage::Transport => "oops, there was a problem calling the JANE service, sorry!",
            ErrorStage::Decode => "oops, I choked trying to process the returned xml, sorry!",
            ErrorStage::Parse => "oops, the JANE service returned a record I could not read, sorry!",
            ErrorStage::Config => "oops, I am not configured correctly, sorry!",
        }
    }
}

pub type Result<T> = std::result::Result<T, JaneError>;
