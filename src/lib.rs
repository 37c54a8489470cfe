//! DevQuiz - Terminal Quiz Library
//!
//! A terminal-based quiz application with multiple question types,
//! a session timer, and persistent best-score tracking, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
