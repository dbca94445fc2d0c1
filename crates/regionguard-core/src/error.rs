//! Shared error type across regionguard crates.

use thiserror::Error;

/// Operator-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Persisted region document is malformed.
    ConfigParse,
    /// Region document could not be read or written.
    Persist,
    /// Command arguments rejected.
    Validation,
    /// Region store has not loaded successfully yet.
    NotLoaded,
    /// Plugin configuration rejected.
    Config,
    /// Unsupported configuration version.
    UnsupportedVersion,
}

impl ErrorCode {
    /// String representation used in logs and operator replies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ConfigParse => "CONFIG_PARSE",
            ErrorCode::Persist => "PERSIST",
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::NotLoaded => "NOT_LOADED",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RegionGuardError>;

/// Unified error type used by core and plugin.
#[derive(Debug, Error)]
pub enum RegionGuardError {
    #[error("malformed region document {path}: {reason}")]
    ConfigParse { path: String, reason: String },
    #[error("persist failed for {path}: {reason}")]
    Persist { path: String, reason: String },
    #[error("{0}")]
    Validation(String),
    #[error("region store is not loaded")]
    NotLoaded,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl RegionGuardError {
    /// Map internal error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegionGuardError::ConfigParse { .. } => ErrorCode::ConfigParse,
            RegionGuardError::Persist { .. } => ErrorCode::Persist,
            RegionGuardError::Validation(_) => ErrorCode::Validation,
            RegionGuardError::NotLoaded => ErrorCode::NotLoaded,
            RegionGuardError::Config(_) => ErrorCode::Config,
            RegionGuardError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
        }
    }
}
