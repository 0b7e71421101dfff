use thiserror::Error;

/// Core error type shared across stockseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection settings failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A connection string could not be parsed into discrete parameters.
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),
    /// A textual value does not name a known domain variant.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Convenience alias for results returned by stockseed crates.
pub type Result<T> = std::result::Result<T, Error>;
