//! Shared fixtures and assertions for the integration tests.

pub mod fixtures;
