//! Auth errors

use nexus_providers::ProviderError;
use thiserror::Error;

/// Authentication errors surfaced to the user
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email is already registered
    #[error("email is already registered")]
    EmailAlreadyInUse,

    /// Password rejected by the credential policy
    #[error("password rejected: {0}")]
    WeakCredential(String),

    /// Account exists but the email address has not been verified yet
    #[error("email address is not verified")]
    EmailNotVerified,

    /// Principal exists without a matching profile record
    #[error("user profile not found")]
    ProfileNotFound,

    /// Any other provider failure, carrying the provider's message
    #[error("authentication failed: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            Self::WeakCredential(_) => "WEAK_CREDENTIAL",
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::Unknown(_) => "AUTH_FAILED",
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::EmailTaken => Self::EmailAlreadyInUse,
            ProviderError::WeakPassword(msg) => Self::WeakCredential(msg),
            other => Self::Unknown(other.to_string()),
        }
    }
}
