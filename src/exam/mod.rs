// src/exam/mod.rs

//! The exam session state machine.
//!
//! Everything in here is pure: transitions take the current session and return
//! the next one together with the effects the caller has to carry out.

pub mod effect;
pub mod error;
pub mod identity;
pub mod machine;
pub mod scoring;

pub use effect::{Effect, Notice, NoticeLevel};
pub use error::ExamError;
pub use machine::{ExamState, Outcome, Presence, Session, Transition};
pub use scoring::{Grade, Tally};
