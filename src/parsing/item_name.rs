//! Item name expansion.
//!
//! Backend item names are templates: `CPU $2 time ($3)` takes its `$n` values
//! from the positional parameters of the item key
//! `system.cpu.util[,system,avg1]`, giving `CPU system time (avg1)`.

use crate::models::MetricCatalogItem;

/// Expand an item's name template with the parameters of its key.
///
/// - A missing key, or a key without `[`, leaves the name unchanged.
/// - A key whose `[` has no matching `]` after it is malformed; the raw name is
///   returned.
/// - Parameters are the text between the first `[` and the last `]`, split on
///   `,`. An empty section `key[]` yields one empty parameter.
/// - `$n` is replaced by parameter `n` (1-based), first occurrence only.
///   Substitution runs from the highest index down so `$1` never eats the
///   prefix of `$10`.
/// - Placeholders without a parameter stay as literal text.
///
/// Quoted parameters (`key["a,b"]`) are split like any other text.
///
/// # Examples
///
/// ```rust
/// use zbx_query::models::MetricCatalogItem;
/// use zbx_query::parsing::expand_item_name;
///
/// let item = MetricCatalogItem::new("CPU $2 time ($3)", "system.cpu.util[,system,avg1]");
/// assert_eq!(expand_item_name(&item), "CPU system time (avg1)");
/// ```
pub fn expand_item_name(item: &MetricCatalogItem) -> String {
    let Some(params) = item.key.as_deref().and_then(key_params) else {
        return item.name.clone();
    };

    let mut name = item.name.clone();
    for (idx, param) in params.iter().enumerate().rev() {
        let placeholder = format!("${}", idx + 1);
        name = name.replacen(&placeholder, param, 1);
    }

    tracing::trace!(template = %item.name, expanded = %name, "expanded item name");
    name
}

/// Positional parameters of a key, or `None` if it has no well-formed
/// bracketed section.
fn key_params(key: &str) -> Option<Vec<&str>> {
    let open = key.find('[')?;
    let close = key.rfind(']')?;
    if close < open {
        tracing::debug!(key, "item key has unbalanced brackets");
        return None;
    }
    Some(key[open + 1..close].split(',').collect())
}
