use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{CurrentUser, flash, take_flash};
use super::forms::parse_entry_form;
use super::{ApiError, ApiResponse, AppState, EntryDto, EntryFormView, EntryListView, FormView};
use crate::services::{CreateOutcome, DeleteOutcome, EditOutcome, FetchOutcome};

const DUPLICATE_NOTICE: &str = "This image already exists!";

/// GET /
/// The caller's entries, newest first.
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    session: Session,
) -> Result<Json<ApiResponse<EntryListView>>, ApiError> {
    let entries = state.entries.list(user.id).await?;

    Ok(Json(ApiResponse::success(EntryListView {
        username: user.username,
        entries: entries.into_iter().map(EntryDto::from).collect(),
        notice: take_flash(&session).await,
    })))
}

/// GET /create
pub async fn show_create(_user: CurrentUser, session: Session) -> Json<ApiResponse<FormView>> {
    let notice = take_flash(&session).await;
    Json(ApiResponse::success(FormView { notice }))
}

/// POST /create
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    session: Session,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let form = parse_entry_form(multipart).await?;

    match state.entries.create(user.id, form).await? {
        CreateOutcome::Created(_) => Ok(Redirect::to("/")),
        CreateOutcome::MissingImage => Ok(Redirect::to("/create")),
        CreateOutcome::DuplicateName => {
            flash(&session, DUPLICATE_NOTICE).await;
            Ok(Redirect::to("/create"))
        }
    }
}

/// GET /edit/{id}
/// Owners get the entry payload; non-owners are bounced to the list view
/// with no hint whether the id exists.
pub async fn show_edit(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
    session: Session,
) -> Result<Response, ApiError> {
    match state.entries.fetch(user.id, id).await? {
        FetchOutcome::NotFound => Err(ApiError::not_found("Entry", id)),
        FetchOutcome::NotOwner => Ok(Redirect::to("/").into_response()),
        FetchOutcome::Found(entry) => Ok(Json(ApiResponse::success(EntryFormView {
            entry: EntryDto::from(entry),
            notice: take_flash(&session).await,
        }))
        .into_response()),
    }
}

/// POST /edit/{id}
pub async fn edit_entry(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = parse_entry_form(multipart).await?;

    match state.entries.edit(user.id, id, form).await? {
        EditOutcome::NotFound => Err(ApiError::not_found("Entry", id)),
        EditOutcome::NotOwner => Ok(Redirect::to("/").into_response()),
        EditOutcome::DuplicateName => {
            flash(&session, DUPLICATE_NOTICE).await;
            // Matches the original flow, which sends collisions to the create form
            Ok(Redirect::to("/create").into_response())
        }
        EditOutcome::Updated => Ok(Redirect::to("/").into_response()),
    }
}

/// POST /delete/{id}
/// Redirects to the list view whether or not the caller owned the entry.
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    match state.entries.delete(user.id, id).await? {
        DeleteOutcome::NotFound => Err(ApiError::not_found("Entry", id)),
        DeleteOutcome::Done => Ok(Redirect::to("/")),
    }
}
