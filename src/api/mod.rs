//! HTTP API: router, endpoints, middleware, error mapping.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::app_router;
pub use types::{ApiContext, AuthContext};
