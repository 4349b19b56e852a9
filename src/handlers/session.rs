// src/handlers/session.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Local;
use serde_json::json;

use crate::{
    config::Config,
    error::AppError,
    models::session::{SessionView, TransitionResponse},
    services::sessions::SessionStore,
    state::AppState,
    utils::jwt::{ActiveSession, sign_session_token},
};

use super::apply;

/// Opens a new session on first page load.
///
/// Returns 201 Created with the session token to send as `Authorization: Bearer`.
pub async fn create_session(
    State(config): State<Config>,
    State(sessions): State<SessionStore>,
) -> Result<impl IntoResponse, AppError> {
    let (id, handle) = sessions.create().await;
    let token = sign_session_token(id, &config.jwt_secret)?;
    tracing::info!("Session {} opened", id);

    let session = handle.lock().await;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "type": "Bearer",
            "session": SessionView::new(&session, Local::now()),
        })),
    ))
}

/// Returns the current screen state.
pub async fn get_session(Extension(active): Extension<ActiveSession>) -> Json<SessionView> {
    let session = active.handle.lock().await;
    Json(SessionView::new(&session, Local::now()))
}

/// Exits the system: the session is cleared and destroyed.
pub async fn exit_system(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
) -> Json<TransitionResponse> {
    let mut session = active.handle.lock().await;
    let transition = session.exit();
    let applied = apply(&state, &active, &mut session, transition).await;

    Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    })
}
