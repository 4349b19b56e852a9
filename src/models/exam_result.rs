// src/models/exam_result.rs

use serde::{Deserialize, Serialize};

/// One completed exam, as stored in the results log.
/// Created once at submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub student_id: String,

    /// Percentage in `[0, 100]`.
    pub score: f64,

    pub correct_count: usize,
    pub total_questions: usize,

    /// Local submission time, `YYYY-MM-DD HH:MM:SS`.
    pub exam_time: String,

    /// Time from exam start to submission, `H:MM:SS`.
    pub duration: String,
}
