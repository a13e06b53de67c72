//! fermi-core: Question model, answer evaluation, and session scoring.
//!
//! This crate defines the question bank format, the order-of-magnitude
//! evaluator, and the quiz engine that the rest of fermi-quiz builds on.

pub mod error;
pub mod evaluator;
pub mod loader;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod session;
pub mod traits;
