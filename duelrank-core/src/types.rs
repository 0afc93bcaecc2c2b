use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which slot of a duel won: the first item shown (A) or the second (B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    A,
    B,
}

/// Composite bucket key: one bucket per (segment, context) pair.
///
/// A value pair rather than a joined string, so identifier contents can
/// never collide with a delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub segment: String,
    pub context: String,
}

impl BucketKey {
    pub fn new(segment: impl Into<String>, context: impl Into<String>) -> Self {
        BucketKey {
            segment: segment.into(),
            context: context.into(),
        }
    }
}

/// A ranked item: catalog name plus its current rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    pub item: String,
    pub rating: f64,
}

/// An identifier with its human-readable label. Used for both segments
/// (viewer categories) and contexts (decision questions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labeled {
    pub id: String,
    pub label: String,
}

/// Maps between catalog item names and internal 0..N indices.
///
/// Item order is the configured catalog order, which is also the tiebreak
/// for equal ratings in `rankings` — stable across runs, unlike map
/// iteration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    names: Vec<String>,
    name_to_idx: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_names(names: &[String]) -> Self {
        let mut name_to_idx = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let prev = name_to_idx.insert(name.clone(), idx);
            assert!(prev.is_none(), "Duplicate catalog item: {}", name);
        }
        Catalog {
            names: names.to_vec(),
            name_to_idx,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of a known item. Unknown names are a caller bug.
    pub fn to_idx(&self, name: &str) -> usize {
        *self
            .name_to_idx
            .get(name)
            .unwrap_or_else(|| panic!("Unknown catalog item: {}", name))
    }

    /// Index of an item, or `None` if the catalog does not contain it.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.name_to_idx.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_round_trip() {
        let names: Vec<String> = ["alpha", "beta", "gamma"].iter().map(|s| s.to_string()).collect();
        let catalog = Catalog::from_names(&names);

        assert_eq!(catalog.len(), 3);
        for (idx, name) in names.iter().enumerate() {
            assert_eq!(catalog.to_idx(name), idx);
            assert_eq!(catalog.name(idx), name);
        }
    }

    #[test]
    #[should_panic(expected = "Duplicate catalog item")]
    fn test_catalog_rejects_duplicates() {
        let names: Vec<String> = ["alpha", "beta", "alpha"].iter().map(|s| s.to_string()).collect();
        let _ = Catalog::from_names(&names);
    }

    #[test]
    #[should_panic(expected = "Unknown catalog item")]
    fn test_catalog_unknown_name_panics() {
        let names: Vec<String> = ["alpha"].iter().map(|s| s.to_string()).collect();
        Catalog::from_names(&names).to_idx("beta");
    }

    #[test]
    fn test_bucket_key_no_delimiter_collision() {
        // Joined strings would make ("a", "b__c") and ("a__b", "c") the
        // same key; a value pair keeps them distinct.
        let k1 = BucketKey::new("a", "b__c");
        let k2 = BucketKey::new("a__b", "c");
        assert_ne!(k1, k2);
    }
}
