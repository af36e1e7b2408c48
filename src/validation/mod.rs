//! Structural validation of targets.
//!
//! Validation produces a field-keyed error map. An empty map means the target
//! may be executed; the change gate refuses to signal a refetch otherwise.
//! Validation never fails: problems are data.
//!
//! The editor uses [`PermissiveValidator`] unless told otherwise. Stricter
//! setups compose [`FieldRule`]s in a [`RuleValidator`].

use strsim::levenshtein;

use crate::constants::SIMILARITY_THRESHOLD_PERCENT;
use crate::core::Level;
use crate::models::{Target, ValidationErrors};
use crate::templating::TemplateVariableStore;

/// Checks a target and reports problems per field.
pub trait TargetValidator: Send + Sync {
    fn validate(&self, target: &Target) -> ValidationErrors;
}

/// Accepts every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveValidator;

impl TargetValidator for PermissiveValidator {
    fn validate(&self, _target: &Target) -> ValidationErrors {
        ValidationErrors::new()
    }
}

/// One check on one field of a target.
pub trait FieldRule: Send + Sync {
    /// Key under which failures are reported.
    fn field(&self) -> &str;

    /// Error description, or `None` if the target passes.
    fn check(&self, target: &Target) -> Option<String>;
}

/// Runs a list of rules. The first failure per field wins.
#[derive(Default)]
pub struct RuleValidator {
    rules: Vec<Box<dyn FieldRule>>,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TargetValidator for RuleValidator {
    fn validate(&self, target: &Target) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            if errors.contains_key(rule.field()) {
                continue;
            }
            if let Some(message) = rule.check(target) {
                errors.insert(rule.field().to_string(), message);
            }
        }
        errors
    }
}

/// Flags a filter selection that names a template variable the store does
/// not define.
#[derive(Debug, Clone)]
pub struct TemplateReferenceRule {
    level: Level,
    field: String,
    sigil: String,
    known: Vec<String>,
}

impl TemplateReferenceRule {
    /// Rule for `level`, checking against the variables currently in `store`.
    pub fn new(level: Level, store: &dyn TemplateVariableStore, sigil: &str) -> Self {
        Self {
            level,
            field: level.to_string(),
            sigil: sigil.to_string(),
            known: store.variables().iter().map(|v| v.name.clone()).collect(),
        }
    }

    /// Up to three known variables close to `name`, closest first.
    fn suggestions(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<_> =
            self.known.iter().map(|known| (known, levenshtein(name, known))).collect();
        scored.sort_by_key(|(_, dist)| *dist);
        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= name.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(known, _)| format!("{}{known}", self.sigil))
            .collect()
    }
}

impl FieldRule for TemplateReferenceRule {
    fn field(&self) -> &str {
        &self.field
    }

    fn check(&self, target: &Target) -> Option<String> {
        let selection = target.selection(self.level)?;
        let reference = selection.strip_prefix(self.sigil.as_str())?;
        let name = reference
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .unwrap_or(reference);

        if self.known.iter().any(|known| known == name) {
            return None;
        }

        let suggestions = self.suggestions(name);
        let message = if suggestions.is_empty() {
            format!("Unknown template variable '{selection}'")
        } else {
            format!(
                "Unknown template variable '{selection}' (did you mean {}?)",
                suggestions.join(", ")
            )
        };
        Some(message)
    }
}
