// src/handlers/identity.rs

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};
use chrono::Local;

use crate::{
    error::AppError,
    exam::ExamState,
    models::session::{SessionView, TransitionResponse},
    services::face::check_face_presence,
    state::AppState,
    utils::jwt::ActiveSession,
};

use super::apply;

/// Runs the face-presence check on one camera frame (raw image bytes).
///
/// Classifier failures do not fail the request; they are reported as an
/// inconclusive check the student may override.
pub async fn check_presence(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
    frame: Result<Bytes, BytesRejection>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = active.handle.lock().await;
    session.expect_state(ExamState::IdentityPending)?;

    let frame = frame.map_err(|rejection| {
        tracing::warn!("Camera frame rejected: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!(
                "Camera frame is larger than {} bytes, please take a smaller photo",
                state.config.max_frame_bytes
            ))
        } else {
            AppError::BadRequest("Could not read the camera frame".to_string())
        }
    })?;

    if frame.is_empty() {
        return Err(AppError::BadRequest("No camera frame received".to_string()));
    }

    let presence = check_face_presence(state.detector.as_ref(), &frame).await;
    tracing::info!(
        "Face check for {}: {:?}",
        session.student_id().unwrap_or_default(),
        presence
    );

    let transition = session.observe_presence(presence)?;
    let applied = apply(&state, &active, &mut session, transition).await;

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}

/// Confirms identity and starts the exam clock.
///
/// Presence is checked first. A permitted start still fails with 503 when the
/// question bank cannot be loaded, and the exam does not start.
pub async fn confirm(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = active.handle.lock().await;

    let transition = session
        .confirm_identity(Local::now())
        .inspect_err(|e| tracing::info!("Exam start rejected: {}", e))?;
    // The transition is only applied once the paper can be served.
    let questions = state.bank.load().await?;
    let applied = apply(&state, &active, &mut session, transition).await;
    tracing::info!(
        "Exam started for {} with {} questions",
        session.student_id().unwrap_or_default(),
        questions.len()
    );

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}
