//! Shared Utilities
//!
//! Error handling, security primitives, and input validation helpers.

pub mod error;
pub mod security;
pub mod validation;
