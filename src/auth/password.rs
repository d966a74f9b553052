use crate::error::AppError;

/// Adaptive password hashing with bcrypt. Each hash embeds its own random
/// salt and the cost factor, so `verify` needs no extra inputs.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Comparison against the stored hash is constant-time inside bcrypt.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(plaintext, hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;

    fn hasher() -> PasswordHasher {
        // the lowest cost keeps the tests fast; production uses the configured cost
        PasswordHasher::new(MIN_BCRYPT_COST)
    }

    #[test]
    fn test_hash_and_verify_correct() {
        let hasher = hasher();
        let hash = hasher.hash("my-secure-password").unwrap();
        assert!(hasher.verify("my-secure-password", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash("correct-password").unwrap();
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_different_salts() {
        let hasher = hasher();
        let hash1 = hasher.hash("same-password").unwrap();
        let hash2 = hasher.hash("same-password").unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(hasher.verify("same-password", &hash1).unwrap());
        assert!(hasher.verify("same-password", &hash2).unwrap());
    }

    #[test]
    fn test_hash_is_never_the_plaintext() {
        let hasher = hasher();
        let hash = hasher.hash("Abc12345!").unwrap();
        assert_ne!(hash, "Abc12345!");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = hasher();
        assert!(hasher.verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
