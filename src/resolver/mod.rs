//! Cascading candidate-list resolution.
//!
//! The four filter levels form a chain, `group → host → application → item`.
//! When the selection at one level changes, every later level's candidate
//! list is discarded and rebuilt:
//!
//! 1. The list restarts from a fixed base: the wildcard entry (`*`, shown as
//!    "All") for group, host and application, or the plain "All" label for
//!    items, followed by one templated entry per template variable.
//! 2. Each already-selected ancestor is resolved through the template store
//!    and split into filter values with [`split_metrics`].
//! 3. The catalog is queried with those filters and its answer is appended.
//!    Applications are deduplicated by name and items by expanded name.
//!
//! # Concurrency
//!
//! Fetches for different levels run concurrently. Every refresh starts a new
//! cycle for its level ([`CycleToken`]); a fetch carries the token captured
//! when it was issued and its result is dropped if the level has moved on by
//! the time it completes. A failed or timed-out fetch is logged and leaves the
//! base list in place.
//!
//! The split [`begin`](CascadeResolver::begin) /
//! [`fetch`](CascadeResolver::fetch) / [`complete`](CascadeResolver::complete)
//! API lets an event loop issue a fetch, keep handling events, and apply the
//! result later. [`refresh`](CascadeResolver::refresh) does all three for a
//! set of levels.

mod lists;


pub use lists::{CycleToken, MetricLists};

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::MetricsCatalogClient;
use crate::config::EditorConfig;
use crate::core::{Level, QueryError};
use crate::models::{CandidateEntry, MetricCatalogItem, Target};
use crate::parsing::{expand_item_name, split_metrics};
use crate::templating::{TemplateVariableStore, inject_template_variables};

/// A catalog lookup, with its filters already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    HostGroups,
    Hosts {
        groups: Option<Vec<String>>,
    },
    Applications {
        hosts: Option<Vec<String>>,
        groups: Option<Vec<String>>,
    },
    Items {
        groups: Option<Vec<String>>,
        hosts: Option<Vec<String>>,
        applications: Option<Vec<String>>,
    },
}

impl FetchRequest {
    /// Level whose candidates this request lists.
    pub fn level(&self) -> Level {
        match self {
            Self::HostGroups => Level::Group,
            Self::Hosts {
                ..
            } => Level::Host,
            Self::Applications {
                ..
            } => Level::Application,
            Self::Items {
                ..
            } => Level::Item,
        }
    }

    /// Send the request and turn the answer into candidate entries.
    async fn send(self, client: &dyn MetricsCatalogClient) -> anyhow::Result<Vec<CandidateEntry>> {
        match self {
            Self::HostGroups => client.fetch_host_groups().await,
            Self::Hosts {
                groups,
            } => client.fetch_hosts(groups).await,
            Self::Applications {
                hosts,
                groups,
            } => Ok(unique_applications(client.fetch_applications(hosts, groups).await?)),
            Self::Items {
                groups,
                hosts,
                applications,
            } => Ok(unique_items(client.fetch_items(groups, hosts, applications).await?)),
        }
    }
}

/// A fetch that has been issued for one cycle of one level.
///
/// Consumed by [`CascadeResolver::complete`], so a result can be applied at
/// most once.
#[derive(Debug)]
pub struct PendingFetch {
    cycle: CycleToken,
    request: FetchRequest,
}

impl PendingFetch {
    pub fn level(&self) -> Level {
        self.request.level()
    }

    pub fn cycle(&self) -> CycleToken {
        self.cycle
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

/// Rebuilds candidate lists against a catalog client.
#[derive(Clone)]
pub struct CascadeResolver {
    client: Arc<dyn MetricsCatalogClient>,
    config: EditorConfig,
}

impl std::fmt::Debug for CascadeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeResolver").field("config", &self.config).finish_non_exhaustive()
    }
}

impl CascadeResolver {
    pub fn new(client: Arc<dyn MetricsCatalogClient>, config: EditorConfig) -> Self {
        Self {
            client,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The list a level restarts from: its leading sentinel followed by the
    /// templated entries.
    pub fn base_list(&self, level: Level, store: &dyn TemplateVariableStore) -> Vec<CandidateEntry> {
        let sentinel = match level {
            Level::Item => CandidateEntry::new(&self.config.item_all_label),
            _ => CandidateEntry::new(&self.config.wildcard_name)
                .with_visible_name(&self.config.wildcard_label),
        };
        let mut list = vec![sentinel];
        inject_template_variables(&mut list, store.variables(), &self.config.template_sigil);
        list
    }

    /// Filter values for the selection at `level`, or `None` if nothing is selected.
    pub fn filter_values(
        &self,
        target: &Target,
        level: Level,
        store: &dyn TemplateVariableStore,
    ) -> Option<Vec<String>> {
        target.selection(level).map(|name| split_metrics(&store.resolve(name)))
    }

    /// Catalog request for `level`, scoped by the target's ancestor selections.
    pub fn request_for(
        &self,
        level: Level,
        target: &Target,
        store: &dyn TemplateVariableStore,
    ) -> FetchRequest {
        let filter = |ancestor| self.filter_values(target, ancestor, store);
        match level {
            Level::Group => FetchRequest::HostGroups,
            Level::Host => FetchRequest::Hosts {
                groups: filter(Level::Group),
            },
            Level::Application => FetchRequest::Applications {
                hosts: filter(Level::Host),
                groups: filter(Level::Group),
            },
            Level::Item => FetchRequest::Items {
                groups: filter(Level::Group),
                hosts: filter(Level::Host),
                applications: filter(Level::Application),
            },
        }
    }

    /// Start a new cycle for `level`: reset its list to the base list and
    /// return the fetch that will fill it.
    pub fn begin(
        &self,
        lists: &mut MetricLists,
        level: Level,
        target: &Target,
        store: &dyn TemplateVariableStore,
    ) -> PendingFetch {
        let cycle = lists.reset(level, self.base_list(level, store));
        let request = self.request_for(level, target, store);
        debug!(%level, cycle = cycle.value(), ?request, "refreshing candidate list");
        PendingFetch {
            cycle,
            request,
        }
    }

    /// Run the catalog lookup for a pending fetch.
    ///
    /// The returned future owns everything it needs, so it can be spawned or
    /// polled while the lists are mutated by later events.
    pub fn fetch(
        &self,
        pending: &PendingFetch,
    ) -> impl Future<Output = Result<Vec<CandidateEntry>, QueryError>> + Send + use<> {
        let client = Arc::clone(&self.client);
        let request = pending.request.clone();
        let timeout = self.config.fetch_timeout();
        let timeout_ms = self.config.fetch_timeout_ms;

        async move {
            let level = request.level();
            let response = request.send(client.as_ref());
            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, response).await {
                    Ok(result) => result,
                    Err(_) => {
                        return Err(QueryError::FetchTimedOut {
                            level,
                            timeout_ms,
                        });
                    }
                },
                None => response.await,
            };
            result.map_err(|err| QueryError::fetch_failed(level, &err))
        }
    }

    /// Apply a fetch result to its level, unless the level has started a newer
    /// cycle since the fetch was issued. Returns whether the lists changed.
    pub fn complete(
        &self,
        lists: &mut MetricLists,
        pending: PendingFetch,
        result: Result<Vec<CandidateEntry>, QueryError>,
    ) -> bool {
        let level = pending.level();
        if lists.cycle(level) != pending.cycle {
            debug!(
                %level,
                stale = pending.cycle.value(),
                current = lists.cycle(level).value(),
                "dropping stale fetch result"
            );
            return false;
        }

        match result {
            Ok(entries) => {
                debug!(%level, count = entries.len(), "applying fetched candidates");
                lists.append_if_current(level, pending.cycle, entries)
            }
            Err(err) => {
                warn!(%level, error = %err, "catalog fetch failed; keeping base candidates");
                false
            }
        }
    }

    /// Rebuild the given levels, fetching them concurrently.
    pub async fn refresh(
        &self,
        lists: &mut MetricLists,
        levels: &[Level],
        target: &Target,
        store: &dyn TemplateVariableStore,
    ) {
        let pending: Vec<PendingFetch> =
            levels.iter().map(|&level| self.begin(lists, level, target, store)).collect();

        let results = futures::future::join_all(pending.iter().map(|p| self.fetch(p))).await;

        for (pending, result) in pending.into_iter().zip(results) {
            self.complete(lists, pending, result);
        }
    }
}

/// Application entries deduplicated by name, first occurrence wins.
///
/// Only the name survives; any visible label the client attached is dropped.
fn unique_applications(apps: Vec<CandidateEntry>) -> Vec<CandidateEntry> {
    let mut seen = HashSet::new();
    apps.into_iter()
        .filter(|app| seen.insert(app.name.clone()))
        .map(|app| CandidateEntry::new(app.name))
        .collect()
}

/// Item entries named by their expanded name, deduplicated on it.
fn unique_items(items: Vec<MetricCatalogItem>) -> Vec<CandidateEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for item in items {
        let name = expand_item_name(&item);
        if !seen.insert(name.clone()) {
            continue;
        }
        let entry = CandidateEntry::new(name);
        entries.push(match item.key {
            Some(key) => entry.with_raw_key(key),
            None => entry,
        });
    }
    entries
}
