//! HTTP router.
//!
//! Returns a composable `Router` mounted under `/api/`.
//!
//! Two route groups share the prefix: public routes (registration,
//! login, the doctor marketplace) and protected routes behind the
//! bearer token middleware.

use axum::routing::{get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the application router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>` via `with_state`.
pub fn app_router(ctx: ApiContext) -> Router {
    // Protected routes — bearer token required.
    //
    // Extension must be outermost so the auth middleware can extract
    // ApiContext before handlers run.
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/users/profile", get(endpoints::users::profile))
        .route(
            "/doctors/profile",
            post(endpoints::doctors::create_profile)
                .get(endpoints::doctors::own_profile)
                .put(endpoints::doctors::update_profile),
        )
        .route(
            "/appointments",
            post(endpoints::appointments::create).get(endpoints::appointments::list),
        )
        .route(
            "/appointments/:id",
            get(endpoints::appointments::get_by_id)
                .put(endpoints::appointments::update_status)
                .delete(endpoints::appointments::cancel),
        )
        .route("/admin/users", get(endpoints::admin::list_users))
        .route(
            "/admin/users/:id",
            get(endpoints::admin::get_user)
                .put(endpoints::admin::update_user)
                .delete(endpoints::admin::delete_user),
        )
        .route("/admin/doctors", get(endpoints::admin::list_doctors))
        .route(
            "/admin/doctors/:id/approve",
            put(endpoints::admin::approve_doctor),
        )
        .route("/admin/appointments", get(endpoints::admin::list_appointments))
        .route("/admin/dashboard", get(endpoints::admin::dashboard))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(axum::Extension(ctx.clone()));

    // Public routes — no auth.
    let public = Router::new()
        .route("/users/register", post(endpoints::users::register))
        .route("/users/login", post(endpoints::users::login))
        .route("/doctors", get(endpoints::doctors::list))
        .route("/doctors/specialties", get(endpoints::doctors::specialties))
        .route("/doctors/:id", get(endpoints::doctors::get_by_id))
        .with_state(ctx);

    Router::new().nest("/api", protected).nest("/api", public)
}
