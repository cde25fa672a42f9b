use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Password;
use crate::domain::principal::models::PersonName;
use crate::domain::principal::models::RegisterCommand;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::principal::errors::EmailError;
use crate::principal::errors::NameError;
use crate::principal::errors::PasswordError;
use crate::principal::errors::RoleError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::CREATED, principal.into()))
}

/// HTTP request body for registering a principal (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let first_name = PersonName::new(self.first_name)?;
        let last_name = PersonName::new(self.last_name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let role = self.role.parse::<Role>()?;
        Ok(RegisterCommand::new(
            first_name, last_name, email, password, role,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Response body shared by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl From<&AuthenticatedPrincipal> for AuthResponseData {
    fn from(principal: &AuthenticatedPrincipal) -> Self {
        Self {
            id: principal.id.to_string(),
            full_name: principal.full_name.clone(),
            email: principal.email.as_str().to_string(),
            role: principal.role,
            token: principal.token.clone(),
        }
    }
}
