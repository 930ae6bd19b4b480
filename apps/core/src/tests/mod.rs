//! Test Module
//!
//! Cross-module test suite for the Melli core.
//!
//! ## Test Categories
//! - `workflow_tests`: channel creation, cooldown, naming overrides, reactions, departures
//! - `supervisor_tests`: sequential dispatch and loop resilience
//! - `store_tests`: state and feedback persistence across restarts
//!
//! Shared fixtures (mock platform, tiny classifier) live in `support`.

pub mod support;
