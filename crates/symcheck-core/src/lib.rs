//! symcheck-core — Symptom self-assessment quiz engine.
//!
//! This crate defines the quiz definition model, the loader that validates
//! definition documents, the session navigation state machine, scoring and
//! risk classification, and result export.

pub mod engine;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod scoring;
pub mod store;
pub mod traits;
