// src/services/mod.rs

pub mod face;
pub mod question_bank;
pub mod result_store;
pub mod sessions;
