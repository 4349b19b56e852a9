// src/handlers/mod.rs

pub mod auth;
pub mod exam;
pub mod identity;
pub mod session;

use crate::{
    exam::{Effect, Notice, Session, Transition},
    state::AppState,
    utils::jwt::ActiveSession,
};

/// What the boundary did with a transition's effects.
pub(crate) struct Applied {
    pub notices: Vec<Notice>,
    /// False if a `Persist` effect failed.
    pub saved: bool,
}

/// Stores the new session and carries out the transition's effects.
///
/// A failed result write becomes a warning notice; it never undoes the
/// transition or hides the score.
pub(crate) async fn apply(
    state: &AppState,
    active: &ActiveSession,
    current: &mut Session,
    transition: Transition,
) -> Applied {
    let Transition { session, effects } = transition;
    *current = session;

    let mut applied = Applied {
        notices: Vec::new(),
        saved: true,
    };

    for effect in effects {
        match effect {
            Effect::Notify(notice) => applied.notices.push(notice),
            Effect::Persist(result) => match state.results.append(&result).await {
                Ok(count) => tracing::info!(
                    "Saved result for {} ({:.1}), {} result(s) stored",
                    result.student_id,
                    result.score,
                    count
                ),
                Err(e) => {
                    tracing::error!("Failed to save result for {}: {}", result.student_id, e);
                    applied.saved = false;
                    applied.notices.push(Notice::warning(
                        "Your score could not be saved. Please tell the invigilator",
                    ));
                }
            },
            Effect::Discard => {
                state.sessions.remove(&active.id).await;
                tracing::info!("Session {} closed", active.id);
            }
        }
    }

    applied
}
