use std::sync::Arc;

use crate::application::ports::{
    PasswordHashError, PasswordHasher, RepositoryError, TokenError, TokenService, UserRepository,
};
use crate::domain::{Principal, User, UserId};

/// Credential issuance and bearer-token verification.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(name.to_string(), email.to_string(), password_hash);

        // The unique constraint backstops the check above under concurrency.
        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(RepositoryError::ConstraintViolation(_)) => return Err(AuthError::DuplicateEmail),
            Err(e) => return Err(AuthError::Repository(e)),
        }

        let token = self.tokens.issue(&user.principal())?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok((user, token))
    }

    /// Unknown email and wrong password are indistinguishable in the result
    /// to avoid user enumeration.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.principal())?;
        Ok((user, token))
    }

    /// Verifies a bearer credential and re-resolves the principal against
    /// the user store, so tokens for deleted accounts stop working.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let token = authorization
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(AuthError::Unauthorized)?;

        let claimed = self.tokens.verify(token).map_err(|_| AuthError::Unauthorized)?;

        let user = self
            .users
            .find_by_id(claimed.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(user.principal())
    }

    pub async fn profile(&self, id: UserId) -> Result<User, AuthError> {
        self.users.find_by_id(id).await?.ok_or(AuthError::NotFound)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthorized,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    #[error(transparent)]
    Token(#[from] TokenError),
}
