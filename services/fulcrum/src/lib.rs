//! Fulcrum service library crate.
//!
//! # Purpose
//! Exposes the onboarding and schema registry API, naming rules, configuration,
//! readiness probe and storage backends for use by the binaries and tests.
pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod naming;
pub mod observability;
pub mod readiness;
pub mod store;
