//! In-memory catalog client for tests.

use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::catalog::{CatalogFuture, MetricsCatalogClient};
use crate::core::Level;
use crate::models::{CandidateEntry, MetricCatalogItem};
use crate::resolver::FetchRequest;

#[derive(Debug, Clone)]
struct MockItem {
    group: String,
    host: String,
    application: String,
    item: MetricCatalogItem,
}

/// A tiny monitoring catalog: groups contain hosts, hosts carry items, items
/// belong to an application.
///
/// Filters behave like the backend's: `None` or a list containing `*` matches
/// everything, otherwise the value must be in the list. Every request is
/// recorded, levels can be made to fail, and responses can be delayed to
/// reorder completions.
#[derive(Debug, Default)]
pub struct MockCatalog {
    groups: Vec<String>,
    hosts: Vec<(String, String)>,
    items: Vec<MockItem>,
    failing: Mutex<HashSet<Level>>,
    delays: Mutex<HashMap<Level, VecDeque<Duration>>>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with its hosts.
    #[must_use]
    pub fn with_group(mut self, group: &str, hosts: &[&str]) -> Self {
        self.groups.push(group.to_string());
        self.hosts.extend(hosts.iter().map(|h| (group.to_string(), (*h).to_string())));
        self
    }

    /// Add an item to a host (the host's group is looked up).
    #[must_use]
    pub fn with_item(mut self, host: &str, application: &str, item: MetricCatalogItem) -> Self {
        let group = self
            .hosts
            .iter()
            .find(|(_, h)| h == host)
            .map(|(g, _)| g.clone())
            .unwrap_or_else(|| panic!("host '{host}' must be added with with_group first"));
        self.items.push(MockItem {
            group,
            host: host.to_string(),
            application: application.to_string(),
            item,
        });
        self
    }

    /// Make every subsequent fetch for `level` fail.
    pub fn fail_level(&self, level: Level) {
        self.failing.lock().unwrap().insert(level);
    }

    /// Let fetches for `level` succeed again.
    pub fn recover_level(&self, level: Level) {
        self.failing.lock().unwrap().remove(&level);
    }

    /// Delay the next fetches for `level`, one delay per call, in order.
    pub fn delay_next(&self, level: Level, delays: &[Duration]) {
        self.delays.lock().unwrap().entry(level).or_default().extend(delays.iter().copied());
    }

    /// Requests received so far, in issue order.
    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests received for one level.
    pub fn calls_for(&self, level: Level) -> Vec<FetchRequest> {
        self.calls().into_iter().filter(|call| call.level() == level).collect()
    }

    async fn serve(&self, request: FetchRequest) -> Result<()> {
        let level = request.level();
        self.calls.lock().unwrap().push(request);

        let delay = self.delays.lock().unwrap().get_mut(&level).and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(&level) {
            bail!("mock catalog: {level} lookup failed");
        }
        Ok(())
    }
}

fn matches(filter: &Option<Vec<String>>, value: &str) -> bool {
    match filter {
        None => true,
        Some(values) => values.iter().any(|v| v == "*" || v == value),
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

impl MetricsCatalogClient for MockCatalog {
    fn fetch_host_groups(&self) -> CatalogFuture<'_, CandidateEntry> {
        Box::pin(async move {
            self.serve(FetchRequest::HostGroups).await?;
            Ok(self.groups.iter().map(CandidateEntry::new).collect())
        })
    }

    fn fetch_hosts(&self, groups: Option<Vec<String>>) -> CatalogFuture<'_, CandidateEntry> {
        Box::pin(async move {
            self.serve(FetchRequest::Hosts {
                groups: groups.clone(),
            })
            .await?;

            let mut names = Vec::new();
            for (group, host) in &self.hosts {
                if matches(&groups, group) {
                    push_unique(&mut names, host);
                }
            }
            Ok(names.into_iter().map(CandidateEntry::new).collect())
        })
    }

    fn fetch_applications(
        &self,
        hosts: Option<Vec<String>>,
        groups: Option<Vec<String>>,
    ) -> CatalogFuture<'_, CandidateEntry> {
        Box::pin(async move {
            self.serve(FetchRequest::Applications {
                hosts: hosts.clone(),
                groups: groups.clone(),
            })
            .await?;

            // One entry per (host, application), like the backend.
            let mut seen = HashSet::new();
            Ok(self
                .items
                .iter()
                .filter(|i| matches(&groups, &i.group) && matches(&hosts, &i.host))
                .filter(|i| seen.insert((i.host.clone(), i.application.clone())))
                .map(|i| CandidateEntry::new(&i.application))
                .collect())
        })
    }

    fn fetch_items(
        &self,
        groups: Option<Vec<String>>,
        hosts: Option<Vec<String>>,
        applications: Option<Vec<String>>,
    ) -> CatalogFuture<'_, MetricCatalogItem> {
        Box::pin(async move {
            self.serve(FetchRequest::Items {
                groups: groups.clone(),
                hosts: hosts.clone(),
                applications: applications.clone(),
            })
            .await?;

            Ok(self
                .items
                .iter()
                .filter(|i| {
                    matches(&groups, &i.group)
                        && matches(&hosts, &i.host)
                        && matches(&applications, &i.application)
                })
                .map(|i| i.item.clone())
                .collect())
        })
    }
}
