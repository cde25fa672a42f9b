use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::AuthError;

/// Principal store kept in process memory.
///
/// The duplicate check and the insert happen under one write lock, so two
/// concurrent inserts for the same email never both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrincipalRepository {
    /// Map of normalized email -> principal
    principals: Arc<RwLock<HashMap<EmailAddress, Principal>>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.principals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.principals.read().await.is_empty()
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn insert(&self, principal: Principal) -> Result<Principal, AuthError> {
        let mut principals = self.principals.write().await;

        if principals.contains_key(&principal.email) {
            return Err(AuthError::DuplicateEmail(principal.email.to_string()));
        }

        principals.insert(principal.email.clone(), principal.clone());
        Ok(principal)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Principal>, AuthError> {
        Ok(self.principals.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, AuthError> {
        Ok(self
            .principals
            .read()
            .await
            .values()
            .find(|principal| principal.id == *id)
            .cloned())
    }
}
