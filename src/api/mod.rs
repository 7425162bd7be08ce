use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub mod auth;
mod entries;
mod error;
mod forms;
mod types;

pub use error::ApiError;
pub use types::*;

pub use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_idle_minutes,
        )));

    Router::new()
        .route("/", get(entries::list_entries))
        .route("/login", get(auth::show_login).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/create", get(entries::show_create).post(entries::create_entry))
        .route("/edit/{id}", get(entries::show_edit).post(entries::edit_entry))
        .route("/delete/{id}", post(entries::delete_entry))
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(state.assets.root()),
        )
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
