//! Axum route handlers for the form Sessions API.

use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::IntakePatch;
use crate::recommendations::find_resources;
use crate::session::{SessionView, ViewContext};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub demo_mode: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DemoModeRequest {
    pub demo_mode: bool,
}

fn view_context(state: &AppState) -> ViewContext {
    ViewContext {
        provider: state.advisor.provider(),
        places_enabled: state.places.is_some(),
    }
}

/// POST /api/v1/sessions
///
/// The body is optional; when one is sent it must be a valid request.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let request: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?
    };
    let session = state
        .sessions
        .create(request.demo_mode.unwrap_or(state.config.demo_mode))
        .await;
    Ok((StatusCode::CREATED, Json(session.view(view_context(&state)))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.view(view_context(&state))))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/intake
pub async fn handle_update_intake(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<IntakePatch>,
) -> Result<Json<SessionView>, AppError> {
    let ctx = view_context(&state);
    let view = state
        .sessions
        .update(id, |s| {
            s.update_intake(patch);
            Ok(s.view(ctx))
        })
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/demo-mode
pub async fn handle_set_demo_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DemoModeRequest>,
) -> Result<Json<SessionView>, AppError> {
    let ctx = view_context(&state);
    let view = state
        .sessions
        .update(id, |s| {
            s.set_demo_mode(request.demo_mode);
            Ok(s.view(ctx))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/examples/:index
///
/// Fills the form from an example query. Does not submit.
pub async fn handle_apply_example(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionView>, AppError> {
    let ctx = view_context(&state);
    let view = state
        .sessions
        .update(id, |s| {
            s.apply_example(index)?;
            Ok(s.view(ctx))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/submit
///
/// Provider failures land in the session's `error` field, not in the HTTP status.
/// The lookup runs on its own task so the session leaves `loading` even when
/// the client goes away mid-request.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let ticket = state.sessions.update(id, |s| s.begin_submit()).await?;

    info!(session_id = %id, demo_mode = ticket.demo_mode, "Submitting intake");
    let ctx = view_context(&state);
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let result = find_resources(&task_state, &ticket.intake, ticket.demo_mode).await;
        task_state
            .sessions
            .update(id, |s| {
                s.finish_submit(result);
                Ok(s.view(ctx))
            })
            .await
    });

    let view = match task.await {
        Ok(view) => view?,
        Err(join_err) => {
            error!(session_id = %id, "Submission task failed: {join_err}");
            state
                .sessions
                .update(id, |s| {
                    s.finish_submit(Err(AppError::Internal(anyhow!(
                        "Submission did not complete"
                    ))));
                    Ok(s.view(ctx))
                })
                .await?
        }
    };
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/copy
pub async fn handle_copy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let text = session.copy_text()?.to_string();
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// GET /api/v1/sessions/:id/print
pub async fn handle_print(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let document = session.print_document()?;
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], document))
}
