//! Error types for vq-manager.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for vq-manager operations.
#[derive(Error, Debug)]
pub enum VqError {
    /// Configuration errors (missing account or token, unreadable config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP request could not complete (connect failure, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The SQL API answered with a non-success HTTP status.
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The SQL API answered with a body that does not have the expected shape.
    #[error("Malformed result: {0}")]
    MalformedResult(String),

    /// Invalid user-supplied input (e.g. a bulk-load file that is not a JSON array).
    #[error("Input error: {0}")]
    Input(String),

    /// Local file read/write errors.
    #[error("I/O error: {0}")]
    Io(String),

    /// A statement was still pending after the configured number of polls.
    #[error("Statement {handle} still pending after {attempts} polls")]
    PollLimit { handle: String, attempts: u32 },

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VqError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates an HTTP status error.
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: msg.into(),
        }
    }

    /// Creates a malformed result error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResult(msg.into())
    }

    /// Creates an input error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Transport(_) => "Transport Error",
            Self::Http { .. } => "HTTP Error",
            Self::MalformedResult(_) => "Malformed Result",
            Self::Input(_) => "Input Error",
            Self::Io(_) => "I/O Error",
            Self::PollLimit { .. } => "Poll Limit",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Formats the error for the terminal, prefixed with its category.
    pub fn report(&self) -> String {
        format!("{}: {}", self.category(), self)
    }
}

/// Result type alias using VqError.
pub type Result<T> = std::result::Result<T, VqError>;
