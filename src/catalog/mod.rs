//! Boundary to the monitoring backend's catalog.
//!
//! The query builder never talks to the backend itself. It asks a
//! [`MetricsCatalogClient`] for candidate values, scoped by the filter values
//! already selected at earlier levels. Implementations own the transport,
//! authentication and request deduplication.

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

use crate::models::{CandidateEntry, MetricCatalogItem};

/// Boxed future returned by catalog lookups.
pub type CatalogFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Vec<T>>> + Send + 'a>>;

/// Lists the values that exist at each filter level.
///
/// A filter argument of `None` means "not filtered at this level". A filter
/// list may contain the wildcard name (`*`) or several values produced by
/// [`split_metrics`](crate::parsing::split_metrics).
pub trait MetricsCatalogClient: Send + Sync {
    /// All host groups.
    fn fetch_host_groups(&self) -> CatalogFuture<'_, CandidateEntry>;

    /// Hosts belonging to any of `groups`.
    fn fetch_hosts(&self, groups: Option<Vec<String>>) -> CatalogFuture<'_, CandidateEntry>;

    /// Applications on `hosts` within `groups`.
    ///
    /// The same application name may be reported once per host; the resolver
    /// deduplicates by name.
    fn fetch_applications(
        &self,
        hosts: Option<Vec<String>>,
        groups: Option<Vec<String>>,
    ) -> CatalogFuture<'_, CandidateEntry>;

    /// Items matching all three filters.
    fn fetch_items(
        &self,
        groups: Option<Vec<String>>,
        hosts: Option<Vec<String>>,
        applications: Option<Vec<String>>,
    ) -> CatalogFuture<'_, MetricCatalogItem>;
}
