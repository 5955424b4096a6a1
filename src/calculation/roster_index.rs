//! Name-keyed lookup over a roster snapshot.

use std::collections::HashMap;

use crate::models::RosterEntry;

/// Normalizes a name into its lookup key: trimmed and lower-cased.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::name_key;
///
/// assert_eq!(name_key("  Иванов И.И. "), "иванов и.и.");
/// ```
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A case-insensitive index from employee name to roster entry.
///
/// Entries with a blank name are skipped. If two entries share a key the
/// later one wins; uniqueness is the roster store's concern.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex<'a> {
    entries: HashMap<String, &'a RosterEntry>,
}

impl<'a> RosterIndex<'a> {
    /// Builds the index over a roster snapshot.
    pub fn build(roster: &'a [RosterEntry]) -> Self {
        let entries = roster
            .iter()
            .filter(|entry| !entry.name.trim().is_empty())
            .map(|entry| (name_key(&entry.name), entry))
            .collect();
        Self { entries }
    }

    /// Looks up an entry by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&'a RosterEntry> {
        self.entries.get(&name_key(name)).copied()
    }

    /// Returns the number of indexed names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
