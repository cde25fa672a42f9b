use async_trait::async_trait;

use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::LoginCommand;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::RegisterCommand;
use crate::domain::principal::models::VerifiedIdentity;
use crate::principal::errors::AuthError;

/// Port for credential operations exposed to the transport layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new principal and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Validated names, normalized email, password and role
    ///
    /// # Returns
    /// Principal summary with a signed token
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered, including a lost insert race
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedPrincipal, AuthError>;

    /// Authenticate with email and password and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedPrincipal, AuthError>;

    /// Validate an access token without consulting the store.
    ///
    /// # Errors
    /// * `Unauthenticated` - Any validation failure
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;

    /// Load the principal behind an already verified identity.
    ///
    /// # Errors
    /// * `NotFound` - Principal no longer exists
    /// * `DatabaseError` - Store operation failed
    async fn current_principal(&self, id: &PrincipalId) -> Result<Principal, AuthError>;
}

/// Persistence operations for the principal aggregate.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Persist a new principal.
    ///
    /// The uniqueness of `email` must be enforced atomically by the store.
    ///
    /// # Errors
    /// * `DuplicateEmail` - A principal with this email already exists
    /// * `DatabaseError` - Store operation failed
    async fn insert(&self, principal: Principal) -> Result<Principal, AuthError>;

    /// Retrieve a principal by normalized email.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Principal>, AuthError>;

    /// Retrieve a principal by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, AuthError>;
}
