use axum::{
    Form, Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::Redirect,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, FormView};

const SESSION_USER_KEY: &str = "user_id";
const FLASH_KEY: &str = "flash";

// ============================================================================
// Session helpers
// ============================================================================

/// Queue a one-shot notice for the next view the client loads.
pub async fn flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message.to_string()).await;
}

/// Take (and clear) the pending flash notice, if any.
pub async fn take_flash(session: &Session) -> Option<String> {
    session.remove::<String>(FLASH_KEY).await.ok().flatten()
}

// ============================================================================
// Current identity
// ============================================================================

/// The authenticated identity, resolved from the session and handed to every
/// protected handler as an explicit argument. Extraction failure redirects to
/// the login flow without running the handler.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        let user_id: i32 = session
            .get(SESSION_USER_KEY)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| Redirect::to("/login"))?;

        let user = state
            .store
            .get_user_by_id(user_id)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| Redirect::to("/login"))?;

        Ok(Self {
            id: user.id,
            username: user.username,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /login
pub async fn show_login(session: Session) -> Json<ApiResponse<FormView>> {
    let notice = take_flash(&session).await;
    Json(ApiResponse::success(FormView { notice }))
}

/// POST /login
/// Verify credentials and bind the session to the identity. Failures flash a
/// notice and go back to the login view with no session established.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    let is_valid = state
        .store
        .verify_user_password(&form.username, &form.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        info!(username = %form.username, "Rejected login attempt");
        flash(&session, "Invalid username or password").await;
        return Ok(Redirect::to("/login"));
    }

    let user = state
        .store
        .get_user_by_username(&form.username)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get user: {e}")))?
        .ok_or_else(|| ApiError::internal("User vanished after verification"))?;

    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    info!(username = %user.username, "User logged in");
    Ok(Redirect::to("/"))
}

/// GET /logout
/// Tear down the session; safe to call repeatedly.
pub async fn logout(_user: CurrentUser, session: Session) -> Redirect {
    let _ = session.flush().await;
    Redirect::to("/login")
}
