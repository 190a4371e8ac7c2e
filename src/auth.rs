//! Registration, login and session tokens.
//!
//! Passwords are PBKDF2-hashed. Sessions use opaque bearer tokens:
//! the client holds the token, the database stores only its SHA-256
//! hash. Logging in rotates the token.

use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::repository;
use crate::domain::DomainError;
use crate::models::enums::Role;
use crate::models::User;

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> String {
    use base64::Engine;
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| DomainError::InvalidInput("password could not be hashed".into()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Create an account and open a session.
///
/// Self-registration covers patients and doctors; admin accounts are
/// provisioned directly. Returns the user and the plaintext bearer
/// token (shown once, never stored).
pub fn register(conn: &Connection, req: &RegisterRequest) -> Result<(User, String), DomainError> {
    if req.name.is_empty() {
        return Err(DomainError::InvalidInput("name is required".into()));
    }
    if req.email.is_empty() {
        return Err(DomainError::InvalidInput("email is required".into()));
    }
    if req.password.is_empty() {
        return Err(DomainError::InvalidInput("password is required".into()));
    }

    let role = req.role.unwrap_or(Role::Patient);
    if role == Role::Admin {
        return Err(DomainError::InvalidInput(
            "admin accounts cannot self-register".into(),
        ));
    }

    if repository::get_user_by_email(conn, &req.email)?.is_some() {
        return Err(DomainError::InvalidInput("Email already registered".into()));
    }

    let user = User::new(
        req.name.clone(),
        req.email.clone(),
        hash_password(&req.password)?,
        role,
    );
    repository::insert_user(conn, &user)?;

    let token = generate_token();
    repository::set_token_hash(conn, &user.id, Some(&hash_token(&token)))?;
    tracing::info!(user = %user.id, role = role.as_str(), "Account registered");
    Ok((user, token))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Verify credentials and rotate the session token.
///
/// Wrong email and wrong password are indistinguishable to the caller.
pub fn login(conn: &Connection, req: &LoginRequest) -> Result<(User, String), DomainError> {
    let user = repository::get_user_by_email(conn, &req.email)?;
    let Some(user) = user else {
        return Err(DomainError::Unauthorized);
    };
    if !verify_password(&req.password, &user.password_hash) {
        return Err(DomainError::Unauthorized);
    }

    let token = generate_token();
    repository::set_token_hash(conn, &user.id, Some(&hash_token(&token)))?;
    Ok((user, token))
}

/// Resolve the account holding a presented bearer token.
pub fn authenticate(conn: &Connection, token: &str) -> Result<Option<User>, DomainError> {
    Ok(repository::get_user_by_token_hash(conn, &hash_token(token))?)
}
