//! Data model of the query builder.
//!
//! A [`Target`] is one query row under construction. The dropdowns offer
//! [`CandidateEntry`] values, the catalog reports [`MetricCatalogItem`]s, and a
//! [`TargetSnapshot`] remembers the last target that was accepted for
//! execution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::Level;
use crate::parsing::expand_item_name;

/// Field-keyed validation errors. Empty means the target is structurally valid.
pub type ValidationErrors = BTreeMap<String, String>;

/// One selectable value in a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEntry {
    /// Value sent to the backend (or the `$name` of a template variable)
    pub name: String,

    /// Label shown instead of `name`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_name: Option<String>,

    /// Synthesized from a template variable rather than fetched
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,

    /// Catalog key the entry was expanded from (item level only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_key: Option<String>,
}

impl CandidateEntry {
    /// Plain catalog entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible_name: None,
            templated: false,
            raw_key: None,
        }
    }

    /// Entry synthesized from a template variable, `name` already carrying the sigil.
    pub fn templated(name: impl Into<String>) -> Self {
        Self {
            templated: true,
            ..Self::new(name)
        }
    }

    /// Attach a visible label.
    #[must_use]
    pub fn with_visible_name(mut self, label: impl Into<String>) -> Self {
        self.visible_name = Some(label.into());
        self
    }

    /// Attach the raw catalog key.
    #[must_use]
    pub fn with_raw_key(mut self, key: impl Into<String>) -> Self {
        self.raw_key = Some(key.into());
        self
    }

    /// Text a dropdown should render.
    pub fn display_name(&self) -> &str {
        self.visible_name.as_deref().unwrap_or(&self.name)
    }
}

/// Item as reported by the monitoring backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricCatalogItem {
    /// Display template, possibly containing `$1`, `$2`, ... placeholders
    pub name: String,

    /// Canonical key such as `system.cpu.util[,system,avg1]`
    #[serde(rename = "key_", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// `name` already has its placeholders substituted (picked from a list)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expanded: bool,
}

impl MetricCatalogItem {
    /// Item with a name template and a key.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: Some(key.into()),
            expanded: false,
        }
    }

    /// Item known only by its (already human-readable) name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            expanded: false,
        }
    }

    /// Name with its `$n` placeholders filled from the key, unless that was
    /// already done.
    pub fn display_name(&self) -> String {
        if self.expanded {
            return self.name.clone();
        }
        expand_item_name(self)
    }
}

/// Item list entries hold the expanded name next to the raw key.
impl From<&CandidateEntry> for MetricCatalogItem {
    fn from(entry: &CandidateEntry) -> Self {
        Self {
            name: entry.name.clone(),
            key: entry.raw_key.clone(),
            expanded: true,
        }
    }
}

/// A template variable as exposed by the variable store. Identity only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Variable name without the sigil
    pub name: String,
}

impl TemplateVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }
}

/// The query specification for one row of the query builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Reference id of the row (`A`, `B`, ...)
    #[serde(default)]
    pub ref_id: String,

    #[serde(default)]
    pub group: Option<CandidateEntry>,

    #[serde(default)]
    pub host: Option<CandidateEntry>,

    #[serde(default)]
    pub application: Option<CandidateEntry>,

    #[serde(default)]
    pub item: Option<MetricCatalogItem>,

    /// User-facing series label
    #[serde(default)]
    pub alias: String,

    /// Validation errors from the last validation run
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: ValidationErrors,
}

impl Target {
    /// Empty target with the given reference id.
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Self::default()
        }
    }

    /// Name of the value selected at `level`, if any.
    pub fn selection(&self, level: Level) -> Option<&str> {
        match level {
            Level::Group => self.group.as_ref().map(|g| g.name.as_str()),
            Level::Host => self.host.as_ref().map(|h| h.name.as_str()),
            Level::Application => self.application.as_ref().map(|a| a.name.as_str()),
            Level::Item => self.item.as_ref().map(|i| i.name.as_str()),
        }
    }
}

/// Deep copy of a [`Target`] taken when a refetch was accepted.
///
/// Only used to compare against the next state of the same target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSnapshot(Target);

impl TargetSnapshot {
    /// Capture the current state of `target`.
    pub fn capture(target: &Target) -> Self {
        Self(target.clone())
    }

    /// True if `target` is deep-equal to the captured state.
    pub fn matches(&self, target: &Target) -> bool {
        self.0 == *target
    }

    pub fn target(&self) -> &Target {
        &self.0
    }
}
