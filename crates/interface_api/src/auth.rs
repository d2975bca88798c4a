//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserId;
use domain_access::{Actor, Role, User, UserDirectory};

/// Upper bound on token lifetime (one year)
const MAX_TOKEN_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's role at issue time
    pub role: Role,
    /// Display name, for log lines
    pub name: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token subject {0} is not a known user")]
    UnknownSubject(String),
    #[error("Token could not be issued: {0}")]
    Encoding(String),
}

/// Creates a new JWT token for a directory user
///
/// # Arguments
///
/// * `user` - The authenticated user
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(user: &User, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let lifetime = expiration_secs.min(MAX_TOKEN_LIFETIME_SECS) as i64;
    let exp = now + Duration::seconds(lifetime);

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        name: user.name.clone(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Resolves token claims to the acting user
///
/// The role is taken from the directory rather than the token, so a role
/// change takes effect without reissuing tokens.
pub fn resolve_actor(claims: &Claims, directory: &UserDirectory) -> Result<Actor, AuthError> {
    let id: UserId = claims
        .sub
        .parse()
        .map_err(|_| AuthError::UnknownSubject(claims.sub.clone()))?;
    let user = directory
        .find_by_id(id)
        .map_err(|_| AuthError::UnknownSubject(claims.sub.clone()))?;
    Ok(Actor::User(user.clone()))
}
