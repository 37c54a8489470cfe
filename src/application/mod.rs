//! Application layer managing state and quiz workflows.
//!
//! This module coordinates between the quiz domain and the terminal
//! presentation, translating user intent into session mutations and
//! screen transitions.

pub mod state;

pub use state::*;
