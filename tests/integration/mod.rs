//! Integration test suite for the query builder
//!
//! End-to-end flows through the public API, backed by the in-memory
//! `MockCatalog` from the `test-utils` feature.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cascade**: candidate lists across levels, template injection, staleness
//! - **editor_flow**: event sequences and refetch decisions
//! - **config**: loading editor configuration from files and the environment
//! - **panel**: reference ids, duplication and reordering of targets

mod cascade;
mod config;
mod editor_flow;
mod panel;
