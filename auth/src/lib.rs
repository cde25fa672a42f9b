//! Credential primitives shared by the services in this workspace
//!
//! - Password hashing (Argon2id, salt embedded in the PHC output)
//! - Access token issuance and validation (HS256, issuer/audience bound, no leeway)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, TokenSettings};
//!
//! let settings = TokenSettings::with_lifetime_minutes("issuer", "audience", 60);
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", settings);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::issue("user123", "alice@example.com", "Voter", auth.settings()).unwrap();
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
