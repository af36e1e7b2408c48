//! The set of query rows of one panel.

use serde::{Deserialize, Serialize};

use crate::constants::TARGET_LETTERS;
use crate::core::QueryError;
use crate::models::Target;

/// Ordered query rows with unique reference ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPanel {
    targets: Vec<Target>,
}

impl QueryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel over existing targets, kept as they are.
    pub fn from_targets(targets: Vec<Target>) -> Self {
        Self {
            targets,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Target, QueryError> {
        let len = self.targets.len();
        self.targets.get_mut(index).ok_or(QueryError::TargetIndexOutOfRange {
            index,
            len,
        })
    }

    /// Append an empty target with the next free reference id.
    pub fn add_target(&mut self) -> &mut Target {
        let target = Target::new(self.next_ref_id());
        self.push(target)
    }

    /// Append a deep copy of the target at `index`, under a fresh reference id.
    pub fn duplicate(&mut self, index: usize) -> Result<&mut Target, QueryError> {
        let mut clone = self.get_mut(index)?.clone();
        clone.ref_id = self.next_ref_id();
        tracing::debug!(from = index, ref_id = %clone.ref_id, "duplicated target");
        Ok(self.push(clone))
    }

    /// Move the target at `from` so it ends up at position `to`.
    pub fn move_target(&mut self, from: usize, to: usize) -> Result<(), QueryError> {
        let len = self.targets.len();
        for index in [from, to] {
            if index >= len {
                return Err(QueryError::TargetIndexOutOfRange {
                    index,
                    len,
                });
            }
        }
        let target = self.targets.remove(from);
        self.targets.insert(to, target);
        Ok(())
    }

    /// Remove and return the target at `index`.
    pub fn remove_target(&mut self, index: usize) -> Result<Target, QueryError> {
        if index >= self.targets.len() {
            return Err(QueryError::TargetIndexOutOfRange {
                index,
                len: self.targets.len(),
            });
        }
        Ok(self.targets.remove(index))
    }

    /// First unused letter, then `A1`, `B1`, ... once all letters are taken.
    pub fn next_ref_id(&self) -> String {
        let taken = |id: &str| self.targets.iter().any(|t| t.ref_id == id);
        (0..)
            .flat_map(|round| {
                TARGET_LETTERS.chars().map(move |letter| match round {
                    0 => letter.to_string(),
                    n => format!("{letter}{n}"),
                })
            })
            .find(|id| !taken(id.as_str()))
            .unwrap_or_default()
    }

    fn push(&mut self, target: Target) -> &mut Target {
        self.targets.push(target);
        let last = self.targets.len() - 1;
        &mut self.targets[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateEntry;

    fn ref_ids(panel: &QueryPanel) -> Vec<&str> {
        panel.targets().iter().map(|t| t.ref_id.as_str()).collect()
    }

    #[test]
    fn test_add_assigns_letters() {
        let mut panel = QueryPanel::new();
        panel.add_target();
        panel.add_target();
        assert_eq!(ref_ids(&panel), ["A", "B"]);
    }

    #[test]
    fn test_add_reuses_freed_letter() {
        let mut panel = QueryPanel::new();
        panel.add_target();
        panel.add_target();
        panel.add_target();
        panel.remove_target(1).unwrap();
        panel.add_target();
        assert_eq!(ref_ids(&panel), ["A", "C", "B"]);
    }

    #[test]
    fn test_ref_ids_past_z() {
        let mut panel = QueryPanel::new();
        for _ in 0..27 {
            panel.add_target();
        }
        assert_eq!(panel.targets()[25].ref_id, "Z");
        assert_eq!(panel.targets()[26].ref_id, "A1");
    }

    #[test]
    fn test_duplicate_is_deep_copy() {
        let mut panel = QueryPanel::new();
        panel.add_target().group = Some(CandidateEntry::new("Linux servers"));

        let copy = panel.duplicate(0).unwrap();
        assert_eq!(copy.ref_id, "B");
        copy.group = Some(CandidateEntry::new("Zabbix servers"));

        assert_eq!(panel.targets()[0].group, Some(CandidateEntry::new("Linux servers")));
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn test_move_target() {
        let mut panel = QueryPanel::new();
        for _ in 0..3 {
            panel.add_target();
        }
        panel.move_target(0, 2).unwrap();
        assert_eq!(ref_ids(&panel), ["B", "C", "A"]);
        panel.move_target(2, 0).unwrap();
        assert_eq!(ref_ids(&panel), ["A", "B", "C"]);
    }

    #[test]
    fn test_out_of_range() {
        let mut panel = QueryPanel::new();
        panel.add_target();
        assert_eq!(panel.duplicate(3).unwrap_err(), QueryError::TargetIndexOutOfRange {
            index: 3,
            len: 1,
        });
        assert!(panel.move_target(0, 1).is_err());
        assert!(panel.remove_target(1).is_err());
        assert!(panel.get_mut(0).is_ok());
    }
}
