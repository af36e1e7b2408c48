//! Candidate lists and their cycle tokens.

use serde::Serialize;

use crate::core::Level;
use crate::models::CandidateEntry;

/// Identifies one refresh cycle of one level.
///
/// Tokens only grow. A fetch result is applied only if the token captured
/// when the fetch was issued is still the level's current token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CycleToken(u64);

impl CycleToken {
    #[must_use]
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// The four candidate lists of one target, with one cycle token per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricLists {
    groups: Vec<CandidateEntry>,
    hosts: Vec<CandidateEntry>,
    applications: Vec<CandidateEntry>,
    items: Vec<CandidateEntry>,
    #[serde(skip)]
    cycles: [CycleToken; 4],
}

impl MetricLists {
    /// Lists holding only a loading placeholder, before the first refresh.
    pub fn loading(label: &str) -> Self {
        let placeholder = vec![CandidateEntry::new(label)];
        Self {
            groups: placeholder.clone(),
            hosts: placeholder.clone(),
            applications: placeholder.clone(),
            items: placeholder,
            cycles: [CycleToken::default(); 4],
        }
    }

    /// Candidates currently offered at `level`.
    pub fn get(&self, level: Level) -> &[CandidateEntry] {
        match level {
            Level::Group => &self.groups,
            Level::Host => &self.hosts,
            Level::Application => &self.applications,
            Level::Item => &self.items,
        }
    }

    /// Current cycle token of `level`.
    pub fn cycle(&self, level: Level) -> CycleToken {
        self.cycles[level.index()]
    }

    /// Discard the list at `level`, replace it with `base` and start a new cycle.
    pub(crate) fn reset(&mut self, level: Level, base: Vec<CandidateEntry>) -> CycleToken {
        *self.list_mut(level) = base;
        let slot = &mut self.cycles[level.index()];
        *slot = slot.next();
        *slot
    }

    /// Append fetched entries if `cycle` is still current. Returns whether
    /// they were applied.
    pub(crate) fn append_if_current(
        &mut self,
        level: Level,
        cycle: CycleToken,
        entries: Vec<CandidateEntry>,
    ) -> bool {
        if self.cycle(level) != cycle {
            return false;
        }
        self.list_mut(level).extend(entries);
        true
    }

    fn list_mut(&mut self, level: Level) -> &mut Vec<CandidateEntry> {
        match level {
            Level::Group => &mut self.groups,
            Level::Host => &mut self.hosts,
            Level::Application => &mut self.applications,
            Level::Item => &mut self.items,
        }
    }
}
