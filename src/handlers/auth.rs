// src/handlers/auth.rs

use axum::{Extension, Json, extract::State};
use chrono::Local;
use validator::Validate;

use crate::{
    error::AppError,
    models::session::{LoginRequest, SessionView, TransitionResponse},
    state::AppState,
    utils::jwt::ActiveSession,
};

use super::apply;

/// Logs the student in.
///
/// The student ID must match `20241315XXX` and the password must equal it.
/// A rejected login leaves the session logged out.
pub async fn login(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TransitionResponse>, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut session = active.handle.lock().await;
    let transition = session
        .login(&payload.student_id, &payload.password)
        .inspect_err(|e| tracing::info!("Login rejected for '{}': {}", payload.student_id, e))?;
    let applied = apply(&state, &active, &mut session, transition).await;
    tracing::info!("Student {} logged in", payload.student_id);

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}

/// Leaves the identity check and returns to the login screen.
pub async fn logout(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = active.handle.lock().await;
    let transition = session.back_to_login()?;
    let applied = apply(&state, &active, &mut session, transition).await;

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}
