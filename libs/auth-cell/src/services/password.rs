use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::instrument;

/// One-way salted password hashing. The plaintext never reaches the store.
pub struct PasswordService;

impl PasswordService {
    #[instrument(skip(password))]
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    #[instrument(skip(password, hash))]
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = PasswordService::hash_password("a-strong-password").unwrap();
        assert_ne!(hash, "a-strong-password");
        assert!(PasswordService::verify_password("a-strong-password", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = PasswordService::hash_password("a-strong-password").unwrap();
        assert!(!PasswordService::verify_password("a-wrong-password", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = PasswordService::hash_password("a-strong-password").unwrap();
        let second = PasswordService::hash_password("a-strong-password").unwrap();
        assert_ne!(first, second);
    }
}
