//! Fulcrum HTTP API module.
//!
//! # Purpose
//! Route handler modules plus the shared error and payload types.
pub mod error;
pub mod extract;
pub mod onboardings;
pub mod openapi;
pub mod schemas;
pub mod system;
pub mod types;
