//! Provider errors

use thiserror::Error;

/// Errors surfaced by the external backend contracts
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Email already registered with the identity provider
    #[error("email already registered")]
    EmailTaken,

    /// Password rejected by the provider's credential policy
    #[error("password rejected: {0}")]
    WeakPassword(String),

    /// Wrong email or password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Transport or backend failure
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
