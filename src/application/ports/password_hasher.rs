/// One-way password hashing port. The plaintext never leaves this boundary.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);
