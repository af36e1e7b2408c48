//! Per-row query editor.
//!
//! A [`QueryEditor`] owns one [`Target`], its four candidate lists and the
//! last accepted snapshot. Each user interaction maps to one method:
//!
//! | Event                 | Lists refreshed              | Alias defaulted |
//! |-----------------------|------------------------------|-----------------|
//! | `init`                | all                          | yes             |
//! | `select_host_group`   | host, application, item      | no              |
//! | `select_host`         | application, item            | no              |
//! | `select_application`  | item                         | no              |
//! | `select_item`         | none                         | yes             |
//! | `target_blur`         | none                         | yes             |
//!
//! After every event except `init`, the target is validated and
//! [`TargetChangeGate`] decides whether the query should run. A `true` return
//! value means "run the query now"; the snapshot has already been updated.
//!
//! The `select_*` methods wait for the refreshed lists. An event loop that must
//! keep handling input while the catalog answers uses
//! [`begin_select`](QueryEditor::begin_select) instead: the decision is made
//! immediately and the fetches are completed whenever they finish.

mod gate;

pub use gate::TargetChangeGate;

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::core::{Level, QueryError};
use crate::models::{CandidateEntry, MetricCatalogItem, Target, TargetSnapshot};
use crate::resolver::{CascadeResolver, MetricLists, PendingFetch};
use crate::templating::TemplateVariableStore;
use crate::validation::{PermissiveValidator, TargetValidator};

/// Outcome of [`QueryEditor::begin_select`].
#[derive(Debug)]
#[must_use]
pub struct SelectionChange {
    /// The target changed and is valid; the snapshot is already updated
    pub run_query: bool,

    /// Fetches for the lists after the selected level, in cascade order
    pub pending: Vec<PendingFetch>,
}

/// Editing state for one query row.
pub struct QueryEditor {
    target: Target,
    lists: MetricLists,
    resolver: CascadeResolver,
    validator: Box<dyn TargetValidator>,
    last_accepted: Option<TargetSnapshot>,
}

impl std::fmt::Debug for QueryEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEditor")
            .field("target", &self.target)
            .field("lists", &self.lists)
            .field("last_accepted", &self.last_accepted)
            .finish_non_exhaustive()
    }
}

impl QueryEditor {
    /// Editor for `target`, with loading placeholders and a permissive validator.
    pub fn new(target: Target, resolver: CascadeResolver) -> Self {
        let lists = MetricLists::loading(&resolver.config().loading_label);
        Self {
            target,
            lists,
            resolver,
            validator: Box::new(PermissiveValidator),
            last_accepted: None,
        }
    }

    /// Replace the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl TargetValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn lists(&self) -> &MetricLists {
        &self.lists
    }

    /// Candidates currently offered at `level`.
    pub fn candidates(&self, level: Level) -> &[CandidateEntry] {
        self.lists.get(level)
    }

    /// Snapshot of the last target accepted for execution.
    pub fn last_accepted(&self) -> Option<&TargetSnapshot> {
        self.last_accepted.as_ref()
    }

    pub fn into_target(self) -> Target {
        self.target
    }

    /// Populate every list, default the alias and validate.
    ///
    /// Never signals a query run and never commits a snapshot.
    pub async fn init(&mut self, store: &dyn TemplateVariableStore) {
        self.resolver.refresh(&mut self.lists, &Level::ALL, &self.target, store).await;
        self.set_item_alias();
        self.target.errors = self.validator.validate(&self.target);
    }

    /// A host group was picked (or cleared).
    pub async fn select_host_group(
        &mut self,
        group: Option<CandidateEntry>,
        store: &dyn TemplateVariableStore,
    ) -> bool {
        self.select_filter(Level::Group, group, store).await
    }

    /// A host was picked (or cleared).
    pub async fn select_host(
        &mut self,
        host: Option<CandidateEntry>,
        store: &dyn TemplateVariableStore,
    ) -> bool {
        self.select_filter(Level::Host, host, store).await
    }

    /// An application was picked (or cleared).
    pub async fn select_application(
        &mut self,
        application: Option<CandidateEntry>,
        store: &dyn TemplateVariableStore,
    ) -> bool {
        self.select_filter(Level::Application, application, store).await
    }

    /// Apply a selection without waiting for the catalog.
    ///
    /// Sets the selection at `level`, restarts every later list from its base
    /// list and decides right away whether the query should run. The returned
    /// fetches fill the restarted lists; drive them with [`fetch`](Self::fetch)
    /// and [`complete_refresh`](Self::complete_refresh). Fetches of a selection
    /// that has been replaced in the meantime are dropped on completion.
    ///
    /// An item-level selection converts the entry with
    /// `MetricCatalogItem::from` and defaults the alias, like
    /// [`select_item`](Self::select_item).
    pub fn begin_select(
        &mut self,
        level: Level,
        selection: Option<CandidateEntry>,
        store: &dyn TemplateVariableStore,
    ) -> SelectionChange {
        match level {
            Level::Group => self.target.group = selection,
            Level::Host => self.target.host = selection,
            Level::Application => self.target.application = selection,
            Level::Item => {
                self.target.item = selection.as_ref().map(MetricCatalogItem::from);
                self.set_item_alias();
            }
        }
        debug!(ref_id = %self.target.ref_id, %level, selection = ?self.target.selection(level), "selection changed");

        let pending = level
            .descendants()
            .iter()
            .map(|&descendant| self.resolver.begin(&mut self.lists, descendant, &self.target, store))
            .collect();
        SelectionChange {
            run_query: self.settle(),
            pending,
        }
    }

    /// An item was picked (or cleared).
    ///
    /// Entries from the item list convert with `MetricCatalogItem::from(&entry)`.
    pub fn select_item(&mut self, item: Option<MetricCatalogItem>) -> bool {
        self.target.item = item;
        self.set_item_alias();
        self.settle()
    }

    /// Update the alias as the user types. Does not decide anything; the
    /// decision happens on [`target_blur`](Self::target_blur).
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.target.alias = alias.into();
    }

    /// The editor lost focus.
    pub fn target_blur(&mut self) -> bool {
        self.set_item_alias();
        self.settle()
    }

    /// Start refreshing one level without awaiting the catalog.
    pub fn begin_refresh(&mut self, level: Level, store: &dyn TemplateVariableStore) -> PendingFetch {
        self.resolver.begin(&mut self.lists, level, &self.target, store)
    }

    /// Catalog lookup for a pending refresh. The future does not borrow the editor.
    pub fn fetch(
        &self,
        pending: &PendingFetch,
    ) -> impl Future<Output = Result<Vec<CandidateEntry>, QueryError>> + Send + use<> {
        self.resolver.fetch(pending)
    }

    /// Apply a finished lookup; stale results are dropped.
    pub fn complete_refresh(
        &mut self,
        pending: PendingFetch,
        result: Result<Vec<CandidateEntry>, QueryError>,
    ) -> bool {
        self.resolver.complete(&mut self.lists, pending, result)
    }

    async fn select_filter(
        &mut self,
        level: Level,
        selection: Option<CandidateEntry>,
        store: &dyn TemplateVariableStore,
    ) -> bool {
        let change = self.begin_select(level, selection, store);
        let results = join_all(change.pending.iter().map(|pending| self.fetch(pending))).await;
        for (pending, result) in change.pending.into_iter().zip(results) {
            self.complete_refresh(pending, result);
        }
        change.run_query
    }

    /// Take the alias from the item name when none is set.
    fn set_item_alias(&mut self) {
        if !self.target.alias.is_empty() {
            return;
        }
        if let Some(item) = &self.target.item {
            self.target.alias = item.display_name();
        }
    }

    fn settle(&mut self) -> bool {
        self.target.errors = self.validator.validate(&self.target);
        let refetch = TargetChangeGate::should_refetch(
            self.last_accepted.as_ref(),
            &self.target,
            &self.target.errors,
        );
        if refetch {
            self.last_accepted = Some(TargetChangeGate::commit(&self.target));
            debug!(ref_id = %self.target.ref_id, "target changed; query should run");
        } else if !self.target.errors.is_empty() {
            debug!(ref_id = %self.target.ref_id, errors = ?self.target.errors, "target invalid; query held");
        }
        refetch
    }
}
