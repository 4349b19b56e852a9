// src/exam/effect.rs

use serde::Serialize;

use crate::models::exam_result::ExamResult;

/// Work a transition asks the boundary to perform after the session is updated.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append the result to the results store.
    Persist(ExamResult),
    /// Show a message to the student.
    Notify(Notice),
    /// Destroy the session.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl From<Notice> for Effect {
    fn from(notice: Notice) -> Self {
        Effect::Notify(notice)
    }
}
