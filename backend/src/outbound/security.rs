//! Argon2id password hashing adapter.

use argon2::password_hash::{PasswordHash as PhcHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher as _};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::PasswordHash;
use crate::domain::ports::{HashingError, PasswordHasherPort};

/// Argon2id hasher producing PHC-format hash strings.
///
/// Uses the `argon2` crate's default parameters, which track the OWASP
/// recommendation for interactive logins.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create the hasher.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasherPort for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, HashingError> {
        let mut salt_bytes = [0u8; 16];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| HashingError::backend(err.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|err| HashingError::backend(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, HashingError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| HashingError::backend(err.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(HashingError::backend(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn hashes_verify_and_reject() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("test1234").expect("hashing succeeds");
        assert!(hash.as_str().starts_with("$argon2"));
        assert!(hasher.verify("test1234", &hash).expect("verify succeeds"));
        assert!(!hasher.verify("wrong", &hash).expect("verify succeeds"));
    }

    #[rstest]
    fn salts_are_unique() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("test1234").expect("hashing succeeds");
        let second = hasher.hash("test1234").expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn garbage_hash_is_an_error() {
        let hasher = Argon2Hasher::new();
        let result = hasher.verify("test1234", &PasswordHash::new("not-a-phc-string"));
        assert!(result.is_err());
    }
}
