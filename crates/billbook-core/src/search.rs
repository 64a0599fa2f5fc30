//! "Jump to nearest match" lookup over the name-sorted person list.

use billbook_domain::Ledger;

/// Result of a person search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank, so no lookup ran.
    Skipped,
    Found(usize),
    NoMatch,
}

impl SearchOutcome {
    pub fn index(self) -> Option<usize> {
        match self {
            SearchOutcome::Found(index) => Some(index),
            SearchOutcome::Skipped | SearchOutcome::NoMatch => None,
        }
    }
}

/// Finds the first person whose name starts with `query`, ignoring case.
///
/// Relies on the ledger being sorted by name, which every mutation in
/// [`crate::LedgerService`] guarantees.
pub fn search_people(ledger: &Ledger, query: &str) -> SearchOutcome {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return SearchOutcome::Skipped;
    }
    match first_prefix_match(&ledger.people, trimmed, |person| person.name.as_str()) {
        Some(index) => SearchOutcome::Found(index),
        None => SearchOutcome::NoMatch,
    }
}

/// Binary search for the earliest item whose key starts with `prefix`
/// (case-insensitive). `items` must be sorted by `key`.
pub fn first_prefix_match<T>(
    items: &[T],
    prefix: &str,
    key: impl Fn(&T) -> &str,
) -> Option<usize> {
    let needle = prefix.to_lowercase();
    let mut low = 0usize;
    let mut high = items.len();
    let mut found = None;

    while low < high {
        let mid = low + (high - low) / 2;
        let candidate = key(&items[mid]).to_lowercase();
        if candidate.starts_with(&needle) {
            found = Some(mid);
            high = mid;
        } else if candidate < needle {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    found
}
