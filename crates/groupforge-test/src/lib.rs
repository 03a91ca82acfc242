//! Shared test fixtures for GroupForge crates.
//!
//! This crate provides builders and small helpers for tests.
//! It depends only on `groupforge-core` so every other crate can use it.
//!
//! - [`problem`] - Fluent `ProblemBuilder`
//! - [`schedule`] - Assignment list helpers
//! - [`constraints`] - Shorthand constraint constructors
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! groupforge-test = { workspace = true }
//! ```

pub mod constraints;
pub mod problem;
pub mod schedule;

pub use problem::ProblemBuilder;
pub use schedule::{assignments, ids, session};
