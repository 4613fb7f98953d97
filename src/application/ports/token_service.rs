use crate::domain::Principal;

/// Signing and verification of bearer tokens carrying a principal.
pub trait TokenService: Send + Sync {
    fn issue(&self, principal: &Principal) -> Result<String, TokenError>;

    /// Verifies signature and expiry and extracts the embedded principal.
    /// The caller still has to re-resolve the principal against the user
    /// store; a valid token alone does not prove the account exists.
    fn verify(&self, token: &str) -> Result<Principal, TokenError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("token signing failed: {0}")]
    SigningFailed(String),
}
