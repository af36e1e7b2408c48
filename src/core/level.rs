//! Filter levels of the query cascade.

use serde::{Deserialize, Serialize};

/// One level of the `group → host → application → item` filter chain.
///
/// Levels are ordered: selecting a value at a level invalidates the candidate
/// lists of every level after it and leaves earlier levels untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Host groups
    Group,

    /// Hosts, filtered by group
    Host,

    /// Applications, filtered by host and group
    Application,

    /// Items (metrics), filtered by group, host and application
    ///
    /// The leaf of the cascade. Its list never offers a wildcard value.
    Item,
}

impl Level {
    /// All levels in cascade order.
    pub const ALL: [Level; 4] = [Level::Group, Level::Host, Level::Application, Level::Item];

    /// Zero-based position in the cascade.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Level::Group => 0,
            Level::Host => 1,
            Level::Application => 2,
            Level::Item => 3,
        }
    }

    /// Levels invalidated by a change at this level, in cascade order.
    #[must_use]
    pub fn descendants(self) -> &'static [Level] {
        &Self::ALL[self.index() + 1..]
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Group => write!(f, "group"),
            Level::Host => write!(f, "host"),
            Level::Application => write!(f, "application"),
            Level::Item => write!(f, "item"),
        }
    }
}
