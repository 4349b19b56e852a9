// src/services/question_bank.rs

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::OnceCell;
use validator::Validate;

use crate::models::question::Question;

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("cannot read question bank {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("question bank is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("question bank is empty")]
    Empty,

    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// Read-only question bank, loaded from disk on first use.
///
/// A successful load is cached for the lifetime of the process and every later
/// call returns the same sequence. Failed loads are not cached.
#[derive(Debug)]
pub struct QuestionBank {
    path: PathBuf,
    cache: OnceCell<Arc<[Question]>>,
}

impl QuestionBank {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    /// Bank that is already loaded. Mostly useful for tests.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        check_questions(&questions)?;
        Ok(Self {
            path: PathBuf::new(),
            cache: OnceCell::new_with(Some(questions.into())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Arc<[Question]>, BankError> {
        self.cache
            .get_or_try_init(|| async {
                let questions = read_bank(&self.path).await?;
                tracing::info!(
                    "Loaded {} questions from {}",
                    questions.len(),
                    self.path.display()
                );
                Ok::<_, BankError>(Arc::from(questions))
            })
            .await
            .map(Arc::clone)
    }
}

async fn read_bank(path: &Path) -> Result<Vec<Question>, BankError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_bank(&raw)
}

/// Parses and checks a bank document.
pub fn parse_bank(raw: &str) -> Result<Vec<Question>, BankError> {
    let questions: Vec<Question> = serde_json::from_str(raw)?;
    check_questions(&questions)?;
    Ok(questions)
}

fn check_questions(questions: &[Question]) -> Result<(), BankError> {
    if questions.is_empty() {
        return Err(BankError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        if let Err(validation_errors) = question.validate() {
            return Err(BankError::InvalidQuestion {
                index,
                reason: validation_errors.to_string(),
            });
        }
        if !question.has_option(&question.correct_answer) {
            return Err(BankError::InvalidQuestion {
                index,
                reason: format!(
                    "correct answer '{}' is not one of its options",
                    question.correct_answer
                ),
            });
        }
    }
    Ok(())
}
