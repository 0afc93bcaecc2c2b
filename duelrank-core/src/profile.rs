/// Ranking profile: the enumerated configuration the core consumes.
///
/// The catalog, segment set, and context set are fixed for the life of a
/// session — only bucket ratings and the vote ledger are runtime state.
/// Constructing a profile validates the contract the rest of the crate
/// relies on: two or more items, at least one segment and context, no
/// duplicate identifiers.
use crate::constants::{DEFAULT_TOP_N, INITIAL_RATING, K_FACTOR};
use crate::types::{Catalog, Labeled};

#[derive(Debug, Clone)]
pub struct Profile {
    pub catalog: Catalog,
    pub segments: Vec<Labeled>,
    pub contexts: Vec<Labeled>,
    pub initial_rating: f64,
    pub k_factor: f64,
    pub top_n: usize,
}

impl Profile {
    /// Build a profile with the default tuning knobs. The tuning fields are
    /// public; callers that need a different starting rating, K-factor, or
    /// top-N override them after construction.
    pub fn new(items: &[String], segments: Vec<Labeled>, contexts: Vec<Labeled>) -> Self {
        assert!(
            items.len() >= 2,
            "A ranking profile needs at least two catalog items."
        );
        assert!(!segments.is_empty(), "A ranking profile needs at least one segment.");
        assert!(!contexts.is_empty(), "A ranking profile needs at least one context.");
        assert_unique_ids(&segments, "segment");
        assert_unique_ids(&contexts, "context");

        Profile {
            catalog: Catalog::from_names(items),
            segments,
            contexts,
            initial_rating: INITIAL_RATING,
            k_factor: K_FACTOR,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Label for a segment id, or `None` if the profile does not define it.
    pub fn segment_label(&self, id: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.label.as_str())
    }

    /// Question text for a context id, or `None` if the profile does not
    /// define it.
    pub fn context_label(&self, id: &str) -> Option<&str> {
        self.contexts
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.label.as_str())
    }
}

fn assert_unique_ids(entries: &[Labeled], kind: &str) {
    for (i, entry) in entries.iter().enumerate() {
        let dup = entries[..i].iter().any(|e| e.id == entry.id);
        assert!(!dup, "Duplicate {} id: {}", kind, entry.id);
    }
}
