use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::VerifiedIdentity;
use crate::principal::errors::AuthError;

/// Issues and verifies access tokens for principals.
///
/// Stateless: verification relies only on the signature and embedded claims,
/// never on the credential store. Cheap to clone.
#[derive(Clone)]
pub struct AccessTokens {
    authenticator: Arc<Authenticator>,
}

impl AccessTokens {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Owned handle for work moved onto another thread.
    pub fn shared_authenticator(&self) -> Arc<Authenticator> {
        Arc::clone(&self.authenticator)
    }

    /// Claims describing `principal`, expiring one configured lifetime from now.
    ///
    /// # Errors
    /// * `TokenIssuance` - The configured lifetime overflows the expiration
    pub fn claims_for(&self, principal: &Principal) -> Result<Claims, AuthError> {
        Claims::issue(
            principal.id,
            principal.email.as_str(),
            principal.role.as_str(),
            self.authenticator.settings(),
        )
        .map_err(|e| AuthError::TokenIssuance(e.to_string()))
    }

    /// Sign a fresh access token for `principal`.
    ///
    /// # Errors
    /// * `TokenIssuance` - Claims could not be built or signing failed
    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        self.authenticator
            .generate_token(&self.claims_for(principal)?)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))
    }

    /// Validate `token` and extract the identity it carries.
    ///
    /// Every failure, whether signature, expiry, issuer, audience or malformed
    /// claims, is reported as `Unauthenticated`.
    pub fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let claims: Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            AuthError::Unauthenticated
        })?;

        Self::identity_from(claims).ok_or_else(|| {
            tracing::debug!("Access token carries unparseable claims");
            AuthError::Unauthenticated
        })
    }

    fn identity_from(claims: Claims) -> Option<VerifiedIdentity> {
        Some(VerifiedIdentity {
            id: PrincipalId::from_string(&claims.sub).ok()?,
            email: EmailAddress::new(claims.email).ok()?,
            role: claims.role.parse().ok()?,
        })
    }
}
