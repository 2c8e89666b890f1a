//! Error types for devops-agent operations.
//!
//! This module defines [`DevopsAgentError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DevopsAgentError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `DevopsAgentError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for devops-agent operations.
#[derive(Debug, Error)]
pub enum DevopsAgentError {
    /// Environment name is not one of the supported deployment targets.
    #[error("Unknown environment '{name}' (supported: {supported})")]
    UnknownEnvironment { name: String, supported: String },

    /// A `--context` argument could not be parsed.
    #[error("Invalid context value: {message}")]
    InvalidContext { message: String },

    /// A command-line argument is out of range.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Failed to parse the context file.
    #[error("Failed to parse context at {path}: {message}")]
    ContextParseError { path: PathBuf, message: String },

    /// An incoming event is missing required fields or is not valid JSON.
    #[error("Invalid event: {message}")]
    InvalidEvent { message: String },

    /// Two stacks with the same id were added to one app.
    #[error("Stack '{id}' is already defined")]
    DuplicateStack { id: String },

    /// Writing the cloud assembly failed.
    #[error("Synthesis of '{stack}' failed: {message}")]
    SynthesisError { stack: String, message: String },

    /// The incident store could not be read or written.
    #[error("Incident store error: {message}")]
    StoreError { message: String },

    /// The agent runtime failed to produce a completion.
    #[error("Agent invocation failed: {message}")]
    AgentError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for devops-agent operations.
pub type Result<T> = std::result::Result<T, DevopsAgentError>;
