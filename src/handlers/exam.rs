// src/handlers/exam.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Local;
use validator::Validate;

use crate::{
    error::AppError,
    exam::ExamState,
    models::{
        question::{AnswerRequest, PublicQuestion},
        session::{ExamPaper, SessionView, SubmitResponse, TransitionResponse},
    },
    state::AppState,
    utils::{jwt::ActiveSession, time::format_elapsed},
};

use super::apply;

/// Returns the exam paper with answer keys removed.
pub async fn get_paper(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
) -> Result<Json<ExamPaper>, AppError> {
    let session = active.handle.lock().await;
    session.expect_state(ExamState::ExamInProgress)?;

    let questions = state.bank.load().await?;
    let public_questions: Vec<PublicQuestion> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| PublicQuestion::from_question(i, q))
        .collect();

    Ok(Json(ExamPaper {
        student_id: session.student_id().unwrap_or_default().to_string(),
        elapsed: session
            .elapsed(Local::now())
            .map(format_elapsed)
            .unwrap_or_default(),
        total_questions: questions.len(),
        questions: public_questions,
        answers: session.answers().clone(),
    }))
}

/// Records (or replaces) the answer for question `index`.
pub async fn record_answer(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
    Path(index): Path<usize>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<TransitionResponse>, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut session = active.handle.lock().await;
    session.expect_state(ExamState::ExamInProgress)?;

    let questions = state.bank.load().await?;
    let transition = session.record_answer(&questions, index, &payload.choice)?;
    let applied = apply(&state, &active, &mut session, transition).await;

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}

/// Withdraws the answer for question `index`.
pub async fn clear_answer(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
    Path(index): Path<usize>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = active.handle.lock().await;
    let transition = session.clear_answer(index)?;
    let applied = apply(&state, &active, &mut session, transition).await;

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}

/// Submits the exam, grades it and appends the result to the results store.
///
/// * Rejects a submission with no answers (the exam stays open).
/// * Unanswered questions count as incorrect.
/// * If the result cannot be saved the score is still returned, with `saved: false`.
pub async fn submit(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
) -> Result<Json<SubmitResponse>, AppError> {
    let mut session = active.handle.lock().await;
    session.expect_state(ExamState::ExamInProgress)?;

    let questions = state.bank.load().await?;
    let transition = session
        .submit(&questions, Local::now())
        .inspect_err(|e| tracing::info!("Submission rejected: {}", e))?;
    let applied = apply(&state, &active, &mut session, transition).await;

    let outcome = session
        .outcome()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("Submitted exam has no outcome".to_string()))?;

    Ok(Json(SubmitResponse {
        outcome,
        saved: applied.saved,
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}

/// Clears the finished attempt and returns to the identity check.
pub async fn retake(
    State(state): State<AppState>,
    Extension(active): Extension<ActiveSession>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = active.handle.lock().await;
    let transition = session.retake()?;
    let applied = apply(&state, &active, &mut session, transition).await;

    Ok(Json(TransitionResponse {
        session: SessionView::new(&session, Local::now()),
        notices: applied.notices,
    }))
}
