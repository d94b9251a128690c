//! Property-based tests

mod determinism;
mod injection;
