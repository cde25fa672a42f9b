use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Parameters shared by token issuance and verification.
///
/// Both sides must be configured with identical values; a token issued under
/// one issuer/audience pair never verifies under another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    pub issuer: String,
    pub audience: String,
    pub lifetime: Duration,
}

impl TokenSettings {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            lifetime,
        }
    }

    /// Settings with a lifetime expressed in minutes, as configured.
    ///
    /// A count too large to represent saturates; issuing claims under such a
    /// lifetime then fails with `LifetimeOutOfRange`.
    pub fn with_lifetime_minutes(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        minutes: i64,
    ) -> Self {
        let lifetime = Duration::try_minutes(minutes).unwrap_or_else(Duration::max_value);
        Self::new(issuer, audience, lifetime)
    }
}

/// Access token claims.
///
/// Standard RFC 7519 claims plus the principal's email and role label.
/// All fields are required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    pub email: String,

    pub role: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a principal, expiring `settings.lifetime` after `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `email` - Normalized email address
    /// * `role` - Role label
    /// * `settings` - Issuer, audience and lifetime
    /// * `issued_at` - Issuance instant
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - The expiration instant is not representable
    pub fn issue_at(
        subject: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        settings: &TokenSettings,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at
            .checked_add_signed(settings.lifetime)
            .ok_or(JwtError::LifetimeOutOfRange)?;

        Ok(Self {
            sub: subject.to_string(),
            email: email.into(),
            role: role.into(),
            iss: settings.issuer.clone(),
            aud: settings.audience.clone(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Same as [`Claims::issue_at`] using the current time.
    pub fn issue(
        subject: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        settings: &TokenSettings,
    ) -> Result<Self, JwtError> {
        Self::issue_at(subject, email, role, settings, Utc::now())
    }
}
