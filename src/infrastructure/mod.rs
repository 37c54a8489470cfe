//! Infrastructure layer providing external collaborators.
//!
//! This module contains the concrete high-score storage backends and
//! question-bank file loading; everything here is replaceable behind
//! the domain's storage trait.

pub mod persistence;

pub use persistence::*;
