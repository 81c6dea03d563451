use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification used when reporting a failure at the command boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Transport,
    HttpStatus,
    FileAccess,
    InvalidPath,
    NotFound,
    Config,
}

#[derive(Error, Debug)]
pub enum GeneQueryError {
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Request to gene service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gene service returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Unexpected response from gene service: {0}")]
    ResponseFormat(#[from] serde_json::Error),

    #[error("The specified file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Error reading file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path expression '{expression}' at position {position}: {message}")]
    InvalidPath {
        expression: String,
        position: usize,
        message: String,
    },

    #[error("No gene information found for '{query}'")]
    NotFound { query: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GeneQueryError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage { .. } => ErrorKind::Usage,
            Self::Transport(_) | Self::ResponseFormat(_) => ErrorKind::Transport,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::FileNotFound { .. } | Self::FileRead { .. } => ErrorKind::FileAccess,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => ErrorKind::Config,
        }
    }

    /// One-line message printed to the console.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Usage { message } => format!("Error: {}", message),
            Self::Transport(e) => format!("Request error: {}", e),
            Self::HttpStatus { status } => format!(
                "Error: Unable to retrieve gene information. Status code: {}",
                status
            ),
            Self::ResponseFormat(e) => format!("Error: Unable to decode gene service response: {}", e),
            Self::FileNotFound { path } => format!(
                "Error: The specified TXT file '{}' does not exist.",
                path.display()
            ),
            Self::FileRead { source, .. } => format!("Error processing TXT file: {}", source),
            other => format!("Error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Usage => "Run with --help to see the required arguments",
            ErrorKind::Transport => "Check your network connection and the configured base URL",
            ErrorKind::HttpStatus => "Verify the base URL points at a MyGene.info compatible service",
            ErrorKind::FileAccess => "Check that the file exists and is readable",
            ErrorKind::InvalidPath => "Check the path expression syntax, e.g. $..symbol",
            ErrorKind::NotFound => "Check the spelling of the gene symbol",
            ErrorKind::Config => "Fix the configuration file or the --base-url flag",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneQueryError>;
