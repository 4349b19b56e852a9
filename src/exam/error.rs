// src/exam/error.rs

use super::machine::ExamState;

/// Rejected transitions. A failed transition never changes the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExamError {
    #[error("Invalid student ID format. Expected 20241315XXX")]
    InvalidFormat,

    #[error("Wrong password. The password is the same as the student ID")]
    PasswordMismatch,

    #[error("No face detected. Please take the photo again")]
    FaceNotDetected,

    #[error("Run the face presence check before starting the exam")]
    PresenceCheckRequired,

    #[error("The question bank is unavailable. Please contact an administrator")]
    BankUnavailable,

    #[error("Answer at least one question before submitting")]
    EmptySubmission,

    #[error("Question {index} does not exist, the exam has {total} questions")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("'{choice}' is not an option of question {index}")]
    InvalidChoice { index: usize, choice: String },

    #[error("Not allowed while {actual}, expected {expected}")]
    WrongState {
        expected: ExamState,
        actual: ExamState,
    },
}
