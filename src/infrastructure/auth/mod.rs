mod bcrypt_hasher;
mod jwt_token_service;

pub use bcrypt_hasher::BcryptHasher;
pub use jwt_token_service::JwtTokenService;
