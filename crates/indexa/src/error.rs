//! CLI error types with miette diagnostics.
//!
//! Maps `QueryError`, config and form failures into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use indexa_config::ConfigError;
use indexa_core::dialog::DialogError;
use indexa_core::{FormErrors, QueryError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Indexa API: {message}")]
    #[diagnostic(
        code(indexa::connection_failed),
        help(
            "Check the API URL (--api-url or the profile's api_url) and your network.\n\
             Self-signed backend? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(indexa::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("A bearer token is required")]
    #[diagnostic(
        code(indexa::token_required),
        help(
            "Pass --token, set INDEXA_TOKEN, or store one with:\n\
             indexa config set-token"
        )
    )]
    TokenRequired,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(indexa::auth_failed),
        help("The token was rejected. Store a fresh one with: indexa config set-token")
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(indexa::not_found),
        help("Run: indexa {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(indexa::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(indexa::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid input: {0}")]
    #[diagnostic(
        code(indexa::invalid_form),
        help("Pass the missing values as flags, or run on a terminal to be prompted.")
    )]
    Form(#[from] FormErrors),

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(indexa::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: indexa config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API URL configured")]
    #[diagnostic(
        code(indexa::no_config),
        help(
            "Create a profile with: indexa config init\n\
             Or pass --api-url. Config expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(indexa::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(indexa::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("prompt failed: {0}")]
    #[diagnostic(code(indexa::prompt))]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    #[diagnostic(code(indexa::dialog))]
    Dialog(#[from] DialogError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::TokenRequired | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ApiError { status, .. } => match status {
                Some(404) => exit_code::NOT_FOUND,
                Some(403) => exit_code::PERMISSION,
                Some(409) => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::Validation { .. } | Self::Form(_) | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Lookup that yielded nothing (e.g. a blank identifier).
    pub fn from_missing(resource_type: &str, identifier: &str, list_command: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        }
    }

    /// Turn a 404 into a resource-specific `NotFound`.
    pub fn from_lookup(err: QueryError, resource_type: &str, identifier: &str, list_command: &str) -> Self {
        if err.is_not_found() {
            Self::from_missing(resource_type, identifier, list_command)
        } else {
            err.into()
        }
    }
}

// ── QueryError → CliError mapping ────────────────────────────────────

impl From<QueryError> for CliError {
    fn from(err: QueryError) -> Self {
        if err.is_token_required() {
            return Self::TokenRequired;
        }
        if err.is_timeout() {
            return Self::Timeout;
        }
        match err {
            QueryError::Unauthorized { message, .. } => Self::AuthFailed { message },
            QueryError::NetworkFailure { message } => Self::ConnectionFailed { message },
            QueryError::ServerError {
                message, status, ..
            } => Self::ApiError {
                status,
                message: if message.is_empty() {
                    indexa_core::error::FALLBACK_DESCRIPTION.into()
                } else {
                    message
                },
            },
        }
    }
}
