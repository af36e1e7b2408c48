//! Template variables.
//!
//! Template variables are owned by an external store. The query builder only
//! needs two things from it: the ordered list of variable names, to offer each
//! variable as a synthetic candidate, and a `resolve` operation that
//! substitutes `$name` references in filter text with the variables' current
//! values before the text is split into filter values.
//!
//! [`StaticTemplateStore`] is a simple in-memory store for hosts that keep
//! variable values themselves, and for tests.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{CandidateEntry, TemplateVariable};

static VARIABLE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\w+)\}|\$(\w+)").unwrap_or_else(|e| panic!("invalid variable regex: {e}"))
});

/// Read-only view of the dashboard's template variables.
pub trait TemplateVariableStore: Send + Sync {
    /// Variables in definition order.
    fn variables(&self) -> &[TemplateVariable];

    /// Replace `$name` references in `text` with current variable values.
    /// Unknown references are left as they are.
    fn resolve(&self, text: &str) -> String;
}

/// Append one templated candidate per variable, in definition order.
///
/// Entries are named `sigil + variable.name`. Nothing is deduplicated: callers
/// start each cascade cycle from a fresh base list.
pub fn inject_template_variables(
    list: &mut Vec<CandidateEntry>,
    variables: &[TemplateVariable],
    sigil: &str,
) {
    list.extend(
        variables
            .iter()
            .map(|variable| CandidateEntry::templated(format!("{sigil}{}", variable.name))),
    );
}

/// In-memory template variable store.
///
/// A variable with one current value resolves to that value; one with several
/// resolves to the braced list form `{v1,v2}` understood by
/// [`split_metrics`](crate::parsing::split_metrics). A variable with no value
/// is left unresolved.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateStore {
    variables: Vec<TemplateVariable>,
    values: HashMap<String, Vec<String>>,
}

impl StaticTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a variable (or replace the values of an existing one).
    #[must_use]
    pub fn with_variable<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_variable(name, values);
        self
    }

    /// Define a variable in place. Redefining keeps its original position.
    pub fn set_variable<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.variables.iter().any(|v| v.name == name) {
            self.variables.push(TemplateVariable::new(name));
        }
        self.values.insert(name.to_string(), values.into_iter().map(Into::into).collect());
    }

    /// Current values of a variable.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    fn render(&self, name: &str) -> Option<String> {
        match self.values.get(name)?.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(format!("{{{}}}", many.join(","))),
        }
    }
}

impl TemplateVariableStore for StaticTemplateStore {
    fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    fn resolve(&self, text: &str) -> String {
        VARIABLE_REF
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                self.render(name).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
