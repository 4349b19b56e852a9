// src/exam/identity.rs

use std::sync::LazyLock;

use regex::Regex;

use super::error::ExamError;

/// Fixed cohort prefix every student ID starts with.
pub const STUDENT_ID_PREFIX: &str = "20241315";

// `\d` would accept non-ASCII digits.
static STUDENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!("^{}[0-9]{{3}}$", regex::escape(STUDENT_ID_PREFIX));
    Regex::new(&pattern).expect("student id pattern is valid")
});

/// True iff `id` is the prefix followed by exactly three ASCII digits.
/// No trimming or other normalization is applied.
pub fn validate_student_id(id: &str) -> bool {
    STUDENT_ID.is_match(id)
}

/// Classroom rule: the password is the student ID itself.
pub fn check_credentials(student_id: &str, password: &str) -> Result<(), ExamError> {
    if !validate_student_id(student_id) {
        return Err(ExamError::InvalidFormat);
    }
    if password != student_id {
        return Err(ExamError::PasswordMismatch);
    }
    Ok(())
}
