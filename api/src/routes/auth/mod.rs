//! # auth Routes Module
//!
//! Placeholder `/auth` endpoints. No credentials are checked and no session
//! is created.

pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

use post::{login, logout};

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → `login`
/// - `POST /auth/logout` → `logout`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}
