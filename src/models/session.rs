// src/models/session.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    exam::{ExamState, Notice, Outcome, Presence, Session},
    models::question::PublicQuestion,
    utils::time::{format_elapsed, format_timestamp},
};

/// What every screen needs to know about the session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: ExamState,
    pub student_id: Option<String>,
    pub logged_in: bool,
    pub face_verified: bool,
    pub exam_started: bool,
    pub presence: Option<Presence>,
    pub answered: usize,
    pub started_at: Option<String>,
    pub elapsed: Option<String>,
    pub outcome: Option<Outcome>,
}

impl SessionView {
    pub fn new(session: &Session, now: DateTime<Local>) -> Self {
        Self {
            state: session.state(),
            student_id: session.student_id().map(str::to_string),
            logged_in: session.is_logged_in(),
            face_verified: session.is_face_verified(),
            exam_started: session.is_exam_started(),
            presence: session.presence(),
            answered: session.answers().len(),
            started_at: session.start_time().as_ref().map(format_timestamp),
            elapsed: session.elapsed(now).map(format_elapsed),
            outcome: session.outcome().cloned(),
        }
    }
}

/// Response of any endpoint that moves the session.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub session: SessionView,
    pub notices: Vec<Notice>,
}

/// Exam screen: the paper without answer keys plus progress.
#[derive(Debug, Serialize)]
pub struct ExamPaper {
    pub student_id: String,
    pub elapsed: String,
    pub total_questions: usize,
    pub questions: Vec<PublicQuestion>,
    pub answers: BTreeMap<usize, String>,
}

/// Result screen.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: Outcome,
    /// False when the result could not be written to the results store.
    pub saved: bool,
    pub session: SessionView,
    pub notices: Vec<Notice>,
}

/// DTO for student login.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct LoginRequest {
    pub student_id: String,
    #[validate(length(max = 128, message = "Password must be at most 128 characters."))]
    pub password: String,
}
