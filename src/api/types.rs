//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::authorization::Actor;
use crate::db;
use crate::models::enums::Role;

/// Shared context for all API routes and middleware.
///
/// Each request opens its own connection; there is no cross-request
/// coordination, caching, or pooling — a failed open or query surfaces
/// as an internal error for that request alone.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }

    /// Open a database connection for the current request.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        db::open_database(&self.db_path).map_err(ApiError::from)
    }
}

/// Authenticated actor context, injected into request extensions by
/// the auth middleware after successful token validation.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub actor: Actor,
    pub name: String,
}

impl AuthContext {
    /// Admin-only routes call this before touching anything.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.actor.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}
