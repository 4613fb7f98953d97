mod support;

use std::sync::Arc;

use chrono::Duration as ChronoDuration;

use support::{TEST_BCRYPT_COST, TEST_SECRET, token_service};
use wayfarer::application::ports::{PasswordHasher, TokenError, TokenService, UserRepository};
use wayfarer::application::services::{AuthError, AuthService};
use wayfarer::domain::{Principal, UserId};
use wayfarer::infrastructure::auth::{BcryptHasher, JwtTokenService};
use wayfarer::infrastructure::persistence::InMemoryUserRepository;

fn auth_service() -> (AuthService, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = AuthService::new(
        Arc::clone(&users) as Arc<dyn UserRepository>,
        Arc::new(BcryptHasher::new(TEST_BCRYPT_COST)),
        Arc::new(token_service()),
    );
    (service, users)
}

fn principal() -> Principal {
    Principal {
        id: UserId::new(),
        email: "alice@example.com".to_string(),
    }
}

#[test]
fn given_password_when_hashing_then_verify_accepts_it_and_rejects_others() {
    let hasher = BcryptHasher::new(TEST_BCRYPT_COST);

    let hash = hasher.hash("hunter22").unwrap();

    assert_ne!(hash, "hunter22");
    assert!(hasher.verify("hunter22", &hash).unwrap());
    assert!(!hasher.verify("hunter23", &hash).unwrap());
}

#[test]
fn given_same_password_when_hashing_twice_then_hashes_differ() {
    let hasher = BcryptHasher::new(TEST_BCRYPT_COST);

    let first = hasher.hash("hunter22").unwrap();
    let second = hasher.hash("hunter22").unwrap();

    assert_ne!(first, second);
}

#[test]
fn given_issued_token_when_verifying_then_principal_round_trips() {
    let service = token_service();
    let principal = principal();

    let token = service.issue(&principal).unwrap();
    let verified = service.verify(&token).unwrap();

    assert_eq!(verified, principal);
}

#[test]
fn given_expired_token_when_verifying_then_expired_error() {
    let issuer = JwtTokenService::new(TEST_SECRET, ChronoDuration::seconds(-3600));

    let token = issuer.issue(&principal()).unwrap();
    let error = token_service().verify(&token).unwrap_err();

    assert!(matches!(error, TokenError::Expired));
}

#[test]
fn given_token_signed_with_other_secret_when_verifying_then_invalid() {
    let other = JwtTokenService::new("some-other-secret", ChronoDuration::days(7));

    let token = other.issue(&principal()).unwrap();
    let error = token_service().verify(&token).unwrap_err();

    assert!(matches!(error, TokenError::Invalid));
}

#[test]
fn given_tampered_token_when_verifying_then_invalid() {
    let token = token_service().issue(&principal()).unwrap();
    let mut tampered = token.clone();
    tampered.pop();

    let error = token_service().verify(&tampered).unwrap_err();

    assert!(matches!(error, TokenError::Invalid));
}

#[tokio::test]
async fn given_new_account_when_registering_then_token_authenticates() {
    let (service, _) = auth_service();

    let (user, token) = service
        .register("Alice", "alice@example.com", "hunter22")
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, "hunter22");

    let authenticated = service
        .authenticate(Some(&format!("Bearer {token}")))
        .await
        .unwrap();
    assert_eq!(authenticated, user.principal());
}

#[tokio::test]
async fn given_taken_email_when_registering_then_duplicate_email() {
    let (service, _) = auth_service();
    service
        .register("Alice", "alice@example.com", "hunter22")
        .await
        .unwrap();

    let error = service
        .register("Mallory", "alice@example.com", "other")
        .await
        .unwrap_err();

    assert!(matches!(error, AuthError::DuplicateEmail));
}

#[tokio::test]
async fn given_unknown_email_and_wrong_password_when_logging_in_then_same_error_variant() {
    let (service, _) = auth_service();
    service
        .register("Alice", "alice@example.com", "hunter22")
        .await
        .unwrap();

    let unknown = service
        .login("nobody@example.com", "hunter22")
        .await
        .unwrap_err();
    let wrong = service
        .login("alice@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn given_good_credentials_when_logging_in_then_token_issued() {
    let (service, _) = auth_service();
    service
        .register("Alice", "alice@example.com", "hunter22")
        .await
        .unwrap();

    let (user, token) = service.login("alice@example.com", "hunter22").await.unwrap();

    assert_eq!(user.name, "Alice");
    let verified = token_service().verify(&token).unwrap();
    assert_eq!(verified.id, user.id);
}

#[tokio::test]
async fn given_token_for_absent_account_when_authenticating_then_unauthorized() {
    // token is valid but the user was never stored
    let (service, _) = auth_service();
    let token = token_service().issue(&principal()).unwrap();

    let error = service
        .authenticate(Some(&format!("Bearer {token}")))
        .await
        .unwrap_err();

    assert!(matches!(error, AuthError::Unauthorized));
}

#[tokio::test]
async fn given_header_without_bearer_scheme_when_authenticating_then_unauthorized() {
    let (service, _) = auth_service();
    let token = token_service().issue(&principal()).unwrap();

    let missing = service.authenticate(None).await.unwrap_err();
    assert!(matches!(missing, AuthError::Unauthorized));

    let bare = service.authenticate(Some(&token)).await.unwrap_err();
    assert!(matches!(bare, AuthError::Unauthorized));
}
