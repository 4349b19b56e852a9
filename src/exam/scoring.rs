// src/exam/scoring.rs

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::models::question::Question;

/// Result of grading one answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tally {
    pub score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
}

/// Grades `answers` against `questions`.
///
/// Question `i` counts as correct only when `answers[i]` equals its correct answer;
/// unanswered and wrong questions are treated the same. Keys past the end of
/// `questions` are ignored. `questions` must not be empty.
pub fn score(questions: &[Question], answers: &BTreeMap<usize, String>) -> Tally {
    debug_assert!(!questions.is_empty(), "grading an empty question bank");

    let correct_count = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(i).is_some_and(|a| *a == q.correct_answer))
        .count();
    let total_questions = questions.len();

    Tally {
        score: 100.0 * correct_count as f64 / total_questions as f64,
        correct_count,
        total_questions,
    }
}

/// Presentation band of a score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Excellent,
    Good,
    Average,
    Pass,
    Fail,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::Excellent
        } else if score >= 80.0 {
            Grade::Good
        } else if score >= 70.0 {
            Grade::Average
        } else if score >= 60.0 {
            Grade::Pass
        } else {
            Grade::Fail
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Average => "average",
            Grade::Pass => "pass",
            Grade::Fail => "fail",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
