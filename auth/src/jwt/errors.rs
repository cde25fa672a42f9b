use thiserror::Error;

/// Error type for JWT operations.
///
/// The variants keep the validation detail for logging. Callers at a trust
/// boundary are expected to collapse them into a single outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token lifetime pushes expiration out of range")]
    LifetimeOutOfRange,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token issuer does not match")]
    InvalidIssuer,

    #[error("Token audience does not match")]
    InvalidAudience,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
