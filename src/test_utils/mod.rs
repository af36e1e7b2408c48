//! Test utilities for the query builder.
//!
//! - [`MockCatalog`] is an in-memory [`MetricsCatalogClient`](crate::catalog::MetricsCatalogClient)
//!   that records requests, fails on demand and can delay responses.
//! - [`fixtures`] holds a sample catalog and template store.
//! - [`init_test_logging`] wires `tracing` output into the test harness.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests.

pub mod fixtures;
mod mock_catalog;

pub use fixtures::{cpu_item, sample_catalog, sample_store};
pub use mock_catalog::MockCatalog;

use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::EditorConfig;
use crate::resolver::CascadeResolver;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=zbx_query=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Resolver over `catalog` with default configuration.
pub fn resolver_for(catalog: Arc<MockCatalog>) -> CascadeResolver {
    CascadeResolver::new(catalog, EditorConfig::default())
}
