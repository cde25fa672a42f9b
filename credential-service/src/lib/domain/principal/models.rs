use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::principal::errors::EmailError;
use crate::principal::errors::NameError;
use crate::principal::errors::PasswordError;
use crate::principal::errors::PrincipalIdError;
use crate::principal::errors::RoleError;

/// Principal aggregate entity.
///
/// Represents a registered account. Created once at registration and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Principal {
    /// First and last name separated by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Principal unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Generate a new random principal ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a principal ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PrincipalIdError> {
        Uuid::parse_str(s)
            .map(PrincipalId)
            .map_err(|e| PrincipalIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a new name.
    ///
    /// # Errors
    /// * `TooLong` - More than 100 characters after trimming
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalized email address type
///
/// Always trimmed and lower-cased, so two addresses differing only in case or
/// surrounding whitespace compare equal. Format is checked with an RFC 5322
/// parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 200;

    /// Normalize and validate an email address.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `TooLong` - More than 200 characters
    /// * `InvalidFormat` - Not an RFC 5322 address
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of principal roles.
///
/// Carried as a label in access tokens; serialized by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Voter,
    Candidate,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Voter => "Voter",
            Role::Candidate => "Candidate",
            Role::Administrator => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    /// Case-insensitive parse of a role label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voter" => Ok(Role::Voter),
            "candidate" => Ok(Role::Candidate),
            "administrator" => Ok(Role::Administrator),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

/// Plaintext password supplied at registration.
///
/// Only emptiness is rejected; no strength policy is applied. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Zero-length password
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Command to register a new principal with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
    pub role: Role,
}

impl RegisterCommand {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password: Password,
        role: Role,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
            role,
        }
    }
}

/// Command to log in with raw credentials.
///
/// The email is normalized by the service. Input that cannot be normalized is
/// reported as invalid credentials, like any other failed login.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub id: PrincipalId,
    pub full_name: String,
    pub email: EmailAddress,
    pub role: Role,
    pub token: String,
}

impl AuthenticatedPrincipal {
    pub fn new(principal: &Principal, token: String) -> Self {
        Self {
            id: principal.id,
            full_name: principal.full_name(),
            email: principal.email.clone(),
            role: principal.role,
            token,
        }
    }
}

/// Identity extracted from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub id: PrincipalId,
    pub email: EmailAddress,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Ana.Pop@Mail.COM \n".to_string()).unwrap();
        assert_eq!(email.as_str(), "ana.pop@mail.com");
        assert_eq!(
            email,
            EmailAddress::new("ana.pop@mail.com".to_string()).unwrap()
        );
    }

    #[test]
    fn test_email_rejects_blank() {
        assert_eq!(EmailAddress::new("   ".to_string()), Err(EmailError::Empty));
    }

    #[test]
    fn test_email_rejects_too_long() {
        let email = format!("{}@mail.com", "a".repeat(195));
        assert!(matches!(
            EmailAddress::new(email),
            Err(EmailError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_email_rejects_bad_format() {
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_name_is_trimmed_and_bounded() {
        let name = PersonName::new("  Ana ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Ana");

        assert!(PersonName::new("x".repeat(100)).is_ok());
        assert_eq!(
            PersonName::new("x".repeat(101)),
            Err(NameError::TooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("voter".parse::<Role>(), Ok(Role::Voter));
        assert_eq!("CANDIDATE".parse::<Role>(), Ok(Role::Candidate));
        assert_eq!(
            Role::Administrator.as_str().parse::<Role>(),
            Ok(Role::Administrator)
        );
        assert!("mayor".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_rejects_empty_and_redacts() {
        assert_eq!(Password::new(String::new()), Err(PasswordError::Empty));

        let password = Password::new("secret123".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("secret123"));
    }

    #[test]
    fn test_full_name() {
        let principal = Principal {
            id: PrincipalId::new(),
            first_name: PersonName::new("Ana".to_string()).unwrap(),
            last_name: PersonName::new("Pop".to_string()).unwrap(),
            email: EmailAddress::new("ana.pop@mail.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: Role::Voter,
            created_at: Utc::now(),
        };
        assert_eq!(principal.full_name(), "Ana Pop");
    }
}
