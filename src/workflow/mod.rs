//! Workflow module
//!
//! This module contains the signing workflow: the context passed through
//! the steps and the engine that drives them.

mod context;
mod engine;

pub use context::SignContext;
pub use engine::{SignOutcome, SigningStrategy, sign};
