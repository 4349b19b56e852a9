// src/exam/machine.rs

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;

use super::{
    effect::{Effect, Notice},
    error::ExamError,
    identity,
    scoring::{self, Grade},
};
use crate::{
    models::{exam_result::ExamResult, question::Question},
    utils::time::{format_elapsed, format_timestamp},
};

/// The four screens a session moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamState {
    LoggedOut,
    IdentityPending,
    ExamInProgress,
    Completed,
}

impl ExamState {
    pub fn as_str(self) -> &'static str {
        match self {
            ExamState::LoggedOut => "logged_out",
            ExamState::IdentityPending => "identity_pending",
            ExamState::ExamInProgress => "exam_in_progress",
            ExamState::Completed => "completed",
        }
    }
}

impl fmt::Display for ExamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the most recent face-presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Detected,
    NotDetected,
    /// The classifier failed. The student may override and continue.
    Inconclusive,
}

/// A graded, submitted exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub result: ExamResult,
    pub grade: Grade,
}

/// Per-student progress record.
///
/// Fields are private so that only transitions can change them, which keeps
/// `face_verified => logged_in` and `exam_started => face_verified`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    student_id: String,
    logged_in: bool,
    face_verified: bool,
    exam_started: bool,
    answers: BTreeMap<usize, String>,
    start_time: Option<DateTime<Local>>,
    presence: Option<Presence>,
    outcome: Option<Outcome>,
}

/// The session after a successful operation, plus what the caller must do next.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(session: Session) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: impl Into<Effect>) -> Self {
        self.effects.push(effect.into());
        self
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ExamState {
        if !self.logged_in {
            ExamState::LoggedOut
        } else if !self.exam_started {
            ExamState::IdentityPending
        } else if self.outcome.is_none() {
            ExamState::ExamInProgress
        } else {
            ExamState::Completed
        }
    }

    pub fn student_id(&self) -> Option<&str> {
        self.logged_in.then_some(self.student_id.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_face_verified(&self) -> bool {
        self.face_verified
    }

    pub fn is_exam_started(&self) -> bool {
        self.exam_started
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    pub fn presence(&self) -> Option<Presence> {
        self.presence
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Time since the exam started. Shown to the student, never enforced.
    pub fn elapsed(&self, now: DateTime<Local>) -> Option<TimeDelta> {
        self.start_time.map(|start| now - start)
    }

    pub fn expect_state(&self, expected: ExamState) -> Result<(), ExamError> {
        let actual = self.state();
        if actual == expected {
            Ok(())
        } else {
            Err(ExamError::WrongState { expected, actual })
        }
    }

    pub fn login(&self, student_id: &str, password: &str) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::LoggedOut)?;
        identity::check_credentials(student_id, password)?;

        let mut next = self.clone();
        next.logged_in = true;
        next.student_id = student_id.to_string();

        Ok(Transition::new(next).with(Notice::success("Login successful")))
    }

    /// Leaves the identity check and drops the login.
    pub fn back_to_login(&self) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::IdentityPending)?;
        Ok(Transition::new(Session::new()))
    }

    /// Records the outcome of a face-presence check.
    pub fn observe_presence(&self, presence: Presence) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::IdentityPending)?;

        let mut next = self.clone();
        next.presence = Some(presence);

        let notice = match presence {
            Presence::Detected => Notice::success("Face detected. You can start the exam"),
            Presence::NotDetected => Notice::warning("No face detected, please take the photo again"),
            Presence::Inconclusive => Notice::warning(
                "The face check ran into a problem, but you may continue to the exam",
            ),
        };

        Ok(Transition::new(next).with(notice))
    }

    /// Starts the exam. Allowed after a detected face or an inconclusive check.
    pub fn confirm_identity(&self, now: DateTime<Local>) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::IdentityPending)?;

        match self.presence {
            Some(Presence::Detected) | Some(Presence::Inconclusive) => {}
            Some(Presence::NotDetected) => return Err(ExamError::FaceNotDetected),
            None => return Err(ExamError::PresenceCheckRequired),
        }

        let mut next = self.clone();
        next.face_verified = true;
        next.exam_started = true;
        next.start_time = Some(now);
        next.answers.clear();

        Ok(Transition::new(next))
    }

    /// Stores `choice` for question `index`, replacing any earlier answer.
    pub fn record_answer(
        &self,
        questions: &[Question],
        index: usize,
        choice: &str,
    ) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::ExamInProgress)?;

        let question = questions.get(index).ok_or(ExamError::QuestionOutOfRange {
            index,
            total: questions.len(),
        })?;
        if !question.has_option(choice) {
            return Err(ExamError::InvalidChoice {
                index,
                choice: choice.to_string(),
            });
        }

        let mut next = self.clone();
        next.answers.insert(index, choice.to_string());

        Ok(Transition::new(next))
    }

    pub fn clear_answer(&self, index: usize) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::ExamInProgress)?;

        let mut next = self.clone();
        next.answers.remove(&index);

        Ok(Transition::new(next))
    }

    /// Grades the recorded answers and asks for the result to be persisted.
    ///
    /// Unanswered questions are scored as incorrect.
    pub fn submit(
        &self,
        questions: &[Question],
        now: DateTime<Local>,
    ) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::ExamInProgress)?;
        if self.answers.is_empty() {
            return Err(ExamError::EmptySubmission);
        }
        if questions.is_empty() {
            return Err(ExamError::BankUnavailable);
        }

        let tally = scoring::score(questions, &self.answers);
        let elapsed = self.elapsed(now).unwrap_or_else(TimeDelta::zero);
        let result = ExamResult {
            student_id: self.student_id.clone(),
            score: tally.score,
            correct_count: tally.correct_count,
            total_questions: tally.total_questions,
            exam_time: format_timestamp(&now),
            duration: format_elapsed(elapsed),
        };
        let grade = Grade::from_score(result.score);

        let answered = self.answers.keys().filter(|i| **i < questions.len()).count();
        let unanswered = questions.len() - answered;

        let mut next = self.clone();
        next.outcome = Some(Outcome {
            result: result.clone(),
            grade,
        });

        let mut transition = Transition::new(next);
        if unanswered > 0 {
            transition = transition
                .with(Notice::warning(format!(
                    "{} question(s) left unanswered are scored as incorrect",
                    unanswered
                )))
                .with(Notice::info(format!(
                    "Answered {}/{} questions",
                    answered,
                    questions.len()
                )));
        } else {
            transition = transition.with(Notice::success("All questions answered"));
        }

        Ok(transition
            .with(Notice::info(format!(
                "Score {:.1} ({}), {}/{} correct",
                result.score, grade, result.correct_count, result.total_questions
            )))
            .with(Effect::Persist(result)))
    }

    /// Clears the attempt but keeps the login, back to the identity check.
    pub fn retake(&self) -> Result<Transition, ExamError> {
        self.expect_state(ExamState::Completed)?;

        let mut next = self.clone();
        next.face_verified = false;
        next.exam_started = false;
        next.answers.clear();
        next.start_time = None;
        next.presence = None;
        next.outcome = None;

        Ok(Transition::new(next))
    }

    /// Forgets everything. Accepted from any state.
    pub fn exit(&self) -> Transition {
        Transition::new(Session::new()).with(Effect::Discard)
    }
}
