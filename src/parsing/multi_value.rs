//! Multi-value filter parsing.
//!
//! Filter text either names a single value (`Linux servers`) or lists several
//! inside braces (`{web01,web02}`), which is the form a multi-value template
//! variable resolves to.
//!
//! # Known limitation
//!
//! Only a comma that is *not* followed by whitespace separates values, so
//! `{Zabbix server, backup}` is one value. There is no escaping: a value
//! containing a bare `,` cannot be expressed inside a braced list.

/// Split filter text into discrete filter values.
///
/// - Text with no leading `{` and no trailing `}` is returned as-is, as a
///   single value.
/// - Otherwise one leading `{` and one trailing `}` are stripped and the rest is
///   split on every comma not followed by whitespace.
///
/// # Examples
///
/// ```rust
/// use zbx_query::parsing::split_metrics;
///
/// assert_eq!(split_metrics("{a,b,c}"), vec!["a", "b", "c"]);
/// assert_eq!(split_metrics("a"), vec!["a"]);
/// assert_eq!(split_metrics("{a, b}"), vec!["a, b"]);
/// ```
pub fn split_metrics(text: &str) -> Vec<String> {
    let inner = text.strip_prefix('{').unwrap_or(text);
    let inner = inner.strip_suffix('}').unwrap_or(inner);

    if inner.len() == text.len() {
        return vec![text.to_string()];
    }

    let mut values = Vec::new();
    let mut start = 0;
    let mut chars = inner.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch != ',' {
            continue;
        }
        let followed_by_space = chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if !followed_by_space {
            values.push(inner[start..idx].to_string());
            start = idx + ch.len_utf8();
        }
    }
    values.push(inner[start..].to_string());

    tracing::trace!(text, count = values.len(), "split multi-value filter");
    values
}
