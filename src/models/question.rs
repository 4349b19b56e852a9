// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One multiple-choice record of the question bank.
///
/// Field names follow the on-disk bank format (`question`, `options`, `correct_answer`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// The text content of the question.
    #[serde(rename = "question")]
    #[validate(length(min = 1, max = 1000))]
    pub text: String,

    /// Ordered choices shown to the student.
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// Must equal one element of `options` exactly.
    pub correct_answer: String,
}

impl Question {
    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|opt| opt == choice)
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("needs_at_least_two_options"));
    }
    for opt in options {
        if opt.is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// DTO for sending a question to the client (excludes the correct answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub index: usize,
    pub text: String,
    pub options: Vec<String>,
}

impl PublicQuestion {
    pub fn from_question(index: usize, question: &Question) -> Self {
        Self {
            index,
            text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}

/// DTO for recording an answer.
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub choice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], answer: &str) -> Question {
        Question {
            text: "Which keyword defines a function?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: answer.to_string(),
        }
    }

    #[test]
    fn test_parses_bank_field_names() {
        let raw = r#"{"question": "1 + 1?", "options": ["1", "2"], "correct_answer": "2"}"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.text, "1 + 1?");
        assert_eq!(q.correct_answer, "2");
        assert!(q.has_option("2"));
        assert!(!q.has_option("3"));
    }

    #[test]
    fn test_single_option_fails_validation() {
        assert!(question(&["def"], "def").validate().is_err());
        assert!(question(&["def", "fn"], "def").validate().is_ok());
    }

    #[test]
    fn test_empty_text_fails_validation() {
        let mut q = question(&["def", "fn"], "def");
        q.text.clear();
        assert!(q.validate().is_err());
    }
}
