//! Global constants used throughout the query builder.
//!
//! Defaults for [`EditorConfig`](crate::config::EditorConfig) live here so that
//! the serde defaults, the tests and the documentation all agree on one value.

/// Sigil that prefixes a template variable name when it is offered as a candidate.
pub const TEMPLATE_SIGIL: &str = "$";

/// Name of the "match everything" entry for group, host and application lists.
///
/// This value is forwarded to the backend as a filter.
pub const WILDCARD_NAME: &str = "*";

/// Human-readable label attached to the wildcard entry.
pub const WILDCARD_LABEL: &str = "All";

/// Name of the leading entry of the item list.
///
/// Items are the leaf of the cascade, so this entry is a plain label and never
/// a wildcard value.
pub const ITEM_ALL_LABEL: &str = "All";

/// Placeholder shown in every list until the first refresh has been issued.
pub const LOADING_LABEL: &str = "Loading...";

/// Letters handed out as query reference ids, in order.
pub const TARGET_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default timeout for a single catalog fetch (30 seconds).
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

/// Environment variable that overrides the editor configuration path.
pub const CONFIG_PATH_ENV: &str = "ZBXQ_CONFIG_PATH";

/// Maximum edit distance, as a percentage of the name length, for
/// "did you mean" template variable suggestions.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
