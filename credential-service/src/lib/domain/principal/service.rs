use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use chrono::Utc;

use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::LoginCommand;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::RegisterCommand;
use crate::domain::principal::models::VerifiedIdentity;
use crate::domain::principal::tokens::AccessTokens;
use crate::principal::errors::AuthError;
use crate::principal::ports::AuthServicePort;
use crate::principal::ports::PrincipalRepository;

/// Domain service implementation for credential operations.
///
/// Holds no mutable state; every call is independent of the others.
pub struct AuthService<PR>
where
    PR: PrincipalRepository,
{
    repository: Arc<PR>,
    tokens: AccessTokens,
}

impl<PR> AuthService<PR>
where
    PR: PrincipalRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Principal persistence implementation
    /// * `tokens` - Access token issuer/verifier
    pub fn new(repository: Arc<PR>, tokens: AccessTokens) -> Self {
        Self { repository, tokens }
    }

    /// Runs Argon2 work on the blocking pool so it never stalls the executor.
    async fn off_executor<F, T>(work: F) -> Result<T, AuthError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Reject a login that has no account behind it, after the same amount
    /// of hashing work a wrong password costs.
    async fn reject_unknown(&self, password: String) -> AuthError {
        let authenticator = self.tokens.shared_authenticator();
        if let Err(e) = Self::off_executor(move || authenticator.verify_decoy(&password)).await {
            tracing::warn!(error = %e, "Decoy verification did not complete");
        }
        AuthError::InvalidCredentials
    }
}

#[async_trait]
impl<PR> AuthServicePort for AuthService<PR>
where
    PR: PrincipalRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedPrincipal, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %command.email, "Registration rejected: email already exists");
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        let authenticator = self.tokens.shared_authenticator();
        let password = command.password.expose().to_owned();
        let password_hash = Self::off_executor(move || authenticator.hash_password(&password))
            .await?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let principal = Principal {
            id: PrincipalId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        // The store's uniqueness constraint settles a race lost after the check above.
        let created = self.repository.insert(principal).await?;

        let token = self.tokens.issue(&created)?;

        tracing::info!(
            principal_id = %created.id,
            role = %created.role,
            "Principal registered"
        );

        Ok(AuthenticatedPrincipal::new(&created, token))
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedPrincipal, AuthError> {
        let LoginCommand { email, password } = command;

        let Ok(email) = EmailAddress::new(email) else {
            return Err(self.reject_unknown(password).await);
        };

        let Some(principal) = self.repository.find_by_email(&email).await? else {
            return Err(self.reject_unknown(password).await);
        };

        let claims = self.tokens.claims_for(&principal)?;

        let authenticator = self.tokens.shared_authenticator();
        let stored_hash = principal.password_hash.clone();
        let result = Self::off_executor(move || {
            authenticator.authenticate(&password, &stored_hash, &claims)
        })
        .await?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => AuthError::Hashing(err.to_string()),
            AuthenticationError::JwtError(err) => AuthError::TokenIssuance(err.to_string()),
        })?;

        tracing::info!(principal_id = %principal.id, "Principal logged in");

        Ok(AuthenticatedPrincipal::new(&principal, result.access_token))
    }

    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        self.tokens.verify(token)
    }

    async fn current_principal(&self, id: &PrincipalId) -> Result<Principal, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))
    }
}
