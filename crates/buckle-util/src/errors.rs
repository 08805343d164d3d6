use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Buckle operations.
#[derive(Debug, Error, Diagnostic)]
pub enum BuckleError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A version string could not be parsed.
    #[error("Invalid version `{input}`: {message}")]
    #[diagnostic(help("Versions follow SemVer, e.g. `1.2.3` or `2.0.0-rc.1`"))]
    Version { input: String, message: String },

    /// A version requirement string could not be parsed.
    #[error("Invalid version requirement `{input}`: {message}")]
    #[diagnostic(help("Requirements are comma-separated comparators, e.g. `>=1.2, <2`"))]
    Requirement { input: String, message: String },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Registry index could not be read or parsed.
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Dependency resolution failed (unsatisfiable requirements).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type BuckleResult<T> = miette::Result<T>;
