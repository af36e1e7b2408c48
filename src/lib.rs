//! Query-builder logic for Zabbix time-series panels.
//!
//! A query row narrows a metric down through four dependent filters,
//! `host group → host → application → item`. This crate is the logic behind
//! those dropdowns:
//!
//! - **Cascade resolution**: which values are selectable at each level, given
//!   the selections above it and the dashboard's template variables
//!   ([`resolver`]).
//! - **Item name expansion**: turning `CPU $2 time ($3)` with key
//!   `system.cpu.util[,system,avg1]` into `CPU system time (avg1)`
//!   ([`parsing::expand_item_name`]).
//! - **Multi-value parsing**: splitting `{web01,web02}` into filter values
//!   ([`parsing::split_metrics`]).
//! - **Change detection**: deciding whether an edit warrants re-running the
//!   query ([`editor::TargetChangeGate`]).
//!
//! The backend transport, the template variable store and the UI are
//! collaborators, reached through [`catalog::MetricsCatalogClient`] and
//! [`templating::TemplateVariableStore`].
//!
//! # Failure model
//!
//! Nothing here fails towards the UI. Catalog errors are logged with
//! `tracing` and leave a degraded candidate list; malformed item keys leave
//! the raw item name; validation problems are stored on the target.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zbx_query::catalog::MetricsCatalogClient;
//! use zbx_query::config::EditorConfig;
//! use zbx_query::core::Level;
//! use zbx_query::editor::QueryEditor;
//! use zbx_query::models::{CandidateEntry, Target};
//! use zbx_query::resolver::CascadeResolver;
//! use zbx_query::templating::StaticTemplateStore;
//!
//! # async fn example(client: Arc<dyn MetricsCatalogClient>) -> anyhow::Result<()> {
//! let resolver = CascadeResolver::new(client, EditorConfig::load_default()?);
//! let store = StaticTemplateStore::new().with_variable("env", ["Linux servers"]);
//! let mut editor = QueryEditor::new(Target::new("A"), resolver);
//!
//! editor.init(&store).await;
//! if editor.select_host_group(Some(CandidateEntry::templated("$env")), &store).await {
//!     // run the query for editor.target()
//! }
//! for host in editor.candidates(Level::Host) {
//!     println!("{}", host.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod core;
pub mod editor;
pub mod models;
pub mod panel;
pub mod parsing;
pub mod resolver;
pub mod templating;
pub mod validation;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
