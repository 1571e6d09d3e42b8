//! Finding kinds and compact finding sets.

use std::fmt;

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// A single quality issue detected on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// The value is missing.
    Null,
    /// The value does not fit the column's declared type.
    TypeMismatch,
    /// The value lies beyond the column's sigma threshold.
    Outlier,
}

impl FindingKind {
    /// All kinds in display order.
    pub const ALL: [FindingKind; 3] = [
        FindingKind::Null,
        FindingKind::TypeMismatch,
        FindingKind::Outlier,
    ];

    /// Get a human-readable label for the finding kind.
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::Null => "Null",
            FindingKind::TypeMismatch => "Type",
            FindingKind::Outlier => "Outlier",
        }
    }

    /// Position in display order.
    pub fn index(&self) -> usize {
        match self {
            FindingKind::Null => 0,
            FindingKind::TypeMismatch => 1,
            FindingKind::Outlier => 2,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of finding kinds, iterated in display order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FindingSet(u8);

impl FindingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Create a set holding one kind.
    pub fn single(kind: FindingKind) -> Self {
        Self(kind.bit())
    }

    /// Add a kind. Returns true if it was not already present.
    pub fn insert(&mut self, kind: FindingKind) -> bool {
        let added = !self.contains(kind);
        self.0 |= kind.bit();
        added
    }

    /// Check membership.
    pub fn contains(&self, kind: FindingKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of distinct kinds present.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Union of two sets.
    pub fn union(self, other: FindingSet) -> FindingSet {
        FindingSet(self.0 | other.0)
    }

    /// Iterate the kinds present in display order.
    pub fn iter(&self) -> impl Iterator<Item = FindingKind> + '_ {
        FindingKind::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl From<FindingKind> for FindingSet {
    fn from(kind: FindingKind) -> Self {
        FindingSet::single(kind)
    }
}

impl FromIterator<FindingKind> for FindingSet {
    fn from_iter<I: IntoIterator<Item = FindingKind>>(iter: I) -> Self {
        let mut set = FindingSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl Extend<FindingKind> for FindingSet {
    fn extend<I: IntoIterator<Item = FindingKind>>(&mut self, iter: I) {
        for kind in iter {
            self.insert(kind);
        }
    }
}

impl fmt::Debug for FindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for FindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.iter().map(|k| k.label()).collect();
        f.write_str(&labels.join("+"))
    }
}

impl Serialize for FindingSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
