//! Password hashing and verification using bcrypt

use crate::error::AppError;

/// Default bcrypt cost factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Password hasher with configurable cost factor
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create hasher with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a per-hash random salt
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AppError::Internal(format!("Failed to hash password: {}", e))
        })
    }

    /// Verify a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let matches = bcrypt::verify(password, hash).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            AppError::Internal(format!("Failed to parse password hash: {}", e))
        })?;

        if matches {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum legal cost keeps the tests fast
    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let password = "correct horse battery staple";

        let hash = hasher.hash(password).unwrap();
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, password);

        hasher.verify(password, &hash).unwrap();
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = test_hasher();

        let hash = hasher.hash("secret1").unwrap();
        assert!(hasher.verify("secret2", &hash).is_err());
    }

    #[test]
    fn test_hash_is_different_each_time() {
        let hasher = test_hasher();
        let password = "secret1";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Hashes differ due to the random salt
        assert_ne!(hash1, hash2);

        hasher.verify(password, &hash1).unwrap();
        hasher.verify(password, &hash2).unwrap();
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        let hasher = test_hasher();

        assert!(hasher.verify("secret1", "not-a-bcrypt-hash").is_err());
        assert!(hasher.verify("secret1", "").is_err());
    }
}
