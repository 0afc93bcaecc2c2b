/// Segmented bucket store.
///
/// One independent rating vector per (segment, context) pair. A vote
/// recorded under one key never moves another bucket's ratings. Ratings
/// are indexed by catalog position; the `Catalog` owns the name mapping.
use std::collections::HashMap;

use crate::profile::Profile;
use crate::types::{BucketKey, Catalog, RankedItem};

#[derive(Debug, Clone, PartialEq)]
pub struct BucketStore {
    buckets: HashMap<BucketKey, Vec<f64>>,
}

impl BucketStore {
    /// One bucket per (segment, context) combination, every catalog item
    /// at the profile's starting rating.
    pub fn new(profile: &Profile) -> Self {
        let mut buckets =
            HashMap::with_capacity(profile.segments.len() * profile.contexts.len());
        for seg in &profile.segments {
            for ctx in &profile.contexts {
                buckets.insert(
                    BucketKey::new(&seg.id, &ctx.id),
                    vec![profile.initial_rating; profile.catalog.len()],
                );
            }
        }
        BucketStore { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn contains(&self, key: &BucketKey) -> bool {
        self.buckets.contains_key(key)
    }

    /// Ratings for a bucket. Initialization covers every (segment, context)
    /// pair, so a missing key is a wiring bug.
    pub fn bucket(&self, key: &BucketKey) -> &[f64] {
        self.buckets
            .get(key)
            .unwrap_or_else(|| panic!("Unknown bucket ({}, {})", key.segment, key.context))
    }

    pub fn bucket_mut(&mut self, key: &BucketKey) -> &mut [f64] {
        self.buckets
            .get_mut(key)
            .unwrap_or_else(|| panic!("Unknown bucket ({}, {})", key.segment, key.context))
    }

    /// Top `n` items of a bucket by rating, descending. Equal ratings keep
    /// catalog order, so the result is stable across runs. Buckets smaller
    /// than `n` return all entries.
    pub fn rankings(&self, catalog: &Catalog, key: &BucketKey, n: usize) -> Vec<RankedItem> {
        let ratings = self.bucket(key);

        let mut order: Vec<usize> = (0..ratings.len()).collect();
        order.sort_by(|&a, &b| {
            ratings[b]
                .partial_cmp(&ratings[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        order.truncate(n);

        order
            .into_iter()
            .map(|i| RankedItem {
                item: catalog.name(i).to_string(),
                rating: ratings[i],
            })
            .collect()
    }
}
