use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Well-formed hash with the same parameters as [`PasswordHasher::hash`] output.
/// No password verifies against it.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$o+FRwj7XWsXVLG7wT0UbtA$KbJP/N14+h1XZLdZpR6F5t8Lq/0He3Dr7etKadjozWI";

/// Argon2id password hashing.
///
/// Every hash carries its own 16-byte random salt inside the PHC string
/// (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<digest>`), so the stored string is
/// the only input verification needs and no salt column exists anywhere.
///
/// The hasher holds no state. Copies can be used from any number of threads at
/// once; each call is CPU-bound for tens of milliseconds and belongs on a
/// blocking thread when called from async code.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
    }

    /// Hash `password` under a fresh salt. Hashing the same password twice
    /// yields two different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check `password` against a stored PHC string, using the salt and
    /// parameters recorded in that string rather than the current defaults.
    ///
    /// A mismatch is `Ok(false)`; only an unparseable stored hash is an error.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Self::argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Spend one full verification on a hash nothing matches.
    ///
    /// Used when there is no stored hash to check, so that path costs the same
    /// as a wrong password.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, DECOY_HASH);
    }
}
