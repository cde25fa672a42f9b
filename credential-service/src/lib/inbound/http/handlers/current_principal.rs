use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::Role;
use crate::domain::principal::models::VerifiedIdentity;
use crate::domain::principal::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Return the stored profile of the principal the bearer token belongs to.
pub async fn current_principal(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> Result<ApiSuccess<CurrentPrincipalData>, ApiError> {
    state
        .auth_service
        .current_principal(&identity.id)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::OK, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentPrincipalData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Principal> for CurrentPrincipalData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.to_string(),
            first_name: principal.first_name.as_str().to_string(),
            last_name: principal.last_name.as_str().to_string(),
            email: principal.email.as_str().to_string(),
            role: principal.role,
        }
    }
}
