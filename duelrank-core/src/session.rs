/// Session state: the persisted aggregate of bucket store + vote ledger.
///
/// Storage is a collaborator supplied by the caller; the core never touches
/// filesystem paths. Absent or corrupt persisted data is treated as "no
/// prior state" — the session starts fresh and the recovery branch is
/// logged, never surfaced as an error.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::bucket::BucketStore;
use crate::ledger::{VoteLedger, VoteRecord};
use crate::profile::Profile;
use crate::types::BucketKey;

/// Persistence collaborator: raw bytes in, raw bytes out.
pub trait Storage {
    /// Current persisted value, or `None` if nothing was ever written.
    fn read(&self) -> Option<Vec<u8>>;
    /// Overwrite the persisted value.
    fn write(&self, raw: &[u8]) -> io::Result<()>;
}

/// In-memory storage for tests and ephemeral sessions. Clones share the
/// same underlying slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Option<Vec<u8>> {
        self.slot.borrow().clone()
    }

    fn write(&self, raw: &[u8]) -> io::Result<()> {
        *self.slot.borrow_mut() = Some(raw.to_vec());
        Ok(())
    }
}

/// How `SessionState::load` obtained its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No persisted data existed.
    Fresh,
    /// Persisted data was decoded successfully.
    Restored,
    /// Persisted data existed but could not be decoded; a fresh state was
    /// substituted.
    Recovered,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to encode session state: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to persist session state: {0}")]
    Storage(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub store: BucketStore,
    pub ledger: VoteLedger,
}

impl SessionState {
    /// Default-initialized state: full bucket coverage at the starting
    /// rating, empty ledger.
    pub fn fresh(profile: &Profile) -> Self {
        SessionState {
            store: BucketStore::new(profile),
            ledger: VoteLedger::new(),
        }
    }

    /// Load persisted state, falling back to a fresh default. The outcome
    /// tells the caller which branch was taken; none of them is an error.
    pub fn load(storage: &dyn Storage, profile: &Profile) -> (Self, LoadOutcome) {
        let raw = match storage.read() {
            Some(raw) => raw,
            None => {
                debug!("no persisted session state, starting fresh");
                return (Self::fresh(profile), LoadOutcome::Fresh);
            }
        };

        match serde_json::from_slice::<PersistedState>(&raw) {
            Ok(persisted) => {
                debug!(votes = persisted.votes.len(), "restored session state");
                (persisted.into_state(profile), LoadOutcome::Restored)
            }
            Err(err) => {
                warn!(%err, "persisted session state is corrupt, starting fresh");
                (Self::fresh(profile), LoadOutcome::Recovered)
            }
        }
    }

    /// Serialize the full aggregate and overwrite the persisted value.
    /// Must run after every mutation so nothing is lost on process exit.
    pub fn save(&self, storage: &dyn Storage, profile: &Profile) -> Result<(), SessionError> {
        let persisted = PersistedState::from_state(self, profile);
        let raw = serde_json::to_vec_pretty(&persisted)?;
        storage.write(&raw)?;
        Ok(())
    }

    /// Discard everything: fresh state, persisted immediately.
    pub fn reset(storage: &dyn Storage, profile: &Profile) -> Result<Self, SessionError> {
        let state = Self::fresh(profile);
        state.save(storage, profile)?;
        Ok(state)
    }
}

/// On-disk shape. Buckets carry item names so the file is self-describing;
/// the catalog index mapping is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct PersistedState {
    buckets: Vec<PersistedBucket>,
    votes: Vec<VoteRecord>,
}

#[derive(Serialize, Deserialize)]
struct PersistedBucket {
    segment: String,
    context: String,
    ratings: BTreeMap<String, f64>,
}

impl PersistedState {
    fn from_state(state: &SessionState, profile: &Profile) -> Self {
        let mut buckets = Vec::with_capacity(profile.segments.len() * profile.contexts.len());
        for seg in &profile.segments {
            for ctx in &profile.contexts {
                let key = BucketKey::new(&seg.id, &ctx.id);
                let ratings: BTreeMap<String, f64> = profile
                    .catalog
                    .names()
                    .iter()
                    .cloned()
                    .zip(state.store.bucket(&key).iter().copied())
                    .collect();
                buckets.push(PersistedBucket {
                    segment: seg.id.clone(),
                    context: ctx.id.clone(),
                    ratings,
                });
            }
        }
        PersistedState {
            buckets,
            votes: state.ledger.votes().to_vec(),
        }
    }

    /// Re-map persisted ratings onto the current profile. Buckets or items
    /// that no longer exist are dropped; items the file never saw start at
    /// the initial rating. The vote ledger is carried over verbatim.
    fn into_state(self, profile: &Profile) -> SessionState {
        let mut store = BucketStore::new(profile);

        for persisted in self.buckets {
            let key = BucketKey::new(persisted.segment, persisted.context);
            if !store.contains(&key) {
                continue;
            }
            let ratings = store.bucket_mut(&key);
            for (name, rating) in persisted.ratings {
                if let Some(idx) = profile.catalog.get(&name) {
                    ratings[idx] = rating;
                }
            }
        }

        SessionState {
            store,
            ledger: VoteLedger::from_votes(self.votes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elo;
    use crate::types::{Labeled, Winner};

    fn labeled(ids: &[&str]) -> Vec<Labeled> {
        ids.iter()
            .map(|id| Labeled {
                id: id.to_string(),
                label: format!("{} label", id),
            })
            .collect()
    }

    fn test_profile() -> Profile {
        let items: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        Profile::new(&items, labeled(&["CAS", "COMP"]), labeled(&["CONC", "REL"]))
    }

    fn vote_once(state: &mut SessionState, profile: &Profile) {
        let key = BucketKey::new("CAS", "CONC");
        elo::apply_outcome(state.store.bucket_mut(&key), 0, 1, Winner::A, profile.k_factor);
        state.ledger.record_at(
            "2026-08-06T10:00:00.000Z".to_string(),
            "CAS label",
            "CONC label",
            "x",
            "y",
            Winner::A,
        );
    }

    #[test]
    fn test_absent_storage_loads_fresh() {
        let profile = test_profile();
        let storage = MemoryStorage::new();

        let (state, outcome) = SessionState::load(&storage, &profile);
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(state, SessionState::fresh(&profile));
    }

    #[test]
    fn test_save_load_round_trip() {
        let profile = test_profile();
        let storage = MemoryStorage::new();

        let mut state = SessionState::fresh(&profile);
        vote_once(&mut state, &profile);
        state.save(&storage, &profile).unwrap();

        let (reloaded, outcome) = SessionState::load(&storage, &profile);
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(reloaded, state);
    }

    #[test]
    fn test_corrupt_storage_recovers_fresh() {
        let profile = test_profile();
        let storage = MemoryStorage::new();
        storage.write(b"definitely not json {{{").unwrap();

        let (state, outcome) = SessionState::load(&storage, &profile);
        assert_eq!(outcome, LoadOutcome::Recovered);
        // Indistinguishable from a never-before-used session.
        assert_eq!(state, SessionState::fresh(&profile));
    }

    #[test]
    fn test_reset_clears_and_persists() {
        let profile = test_profile();
        let storage = MemoryStorage::new();

        let mut state = SessionState::fresh(&profile);
        vote_once(&mut state, &profile);
        state.save(&storage, &profile).unwrap();

        let state = SessionState::reset(&storage, &profile).unwrap();
        assert!(state.ledger.is_empty());
        let bucket = state.store.bucket(&BucketKey::new("CAS", "CONC"));
        assert!(bucket.iter().all(|&r| r == 1000.0));

        // Reset already persisted: a reload sees the cleared aggregate.
        let (reloaded, outcome) = SessionState::load(&storage, &profile);
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(reloaded, state);
    }

    #[test]
    fn test_load_remaps_onto_changed_catalog() {
        let profile = test_profile();
        let storage = MemoryStorage::new();

        // A file written against an older catalog: "w" no longer exists,
        // "z" had not been added yet, and one bucket key is obsolete.
        let raw = serde_json::json!({
            "buckets": [
                {
                    "segment": "CAS",
                    "context": "CONC",
                    "ratings": { "x": 1016.0, "y": 984.0, "w": 1200.0 }
                },
                {
                    "segment": "OLD",
                    "context": "CONC",
                    "ratings": { "x": 900.0 }
                }
            ],
            "votes": []
        });
        storage.write(raw.to_string().as_bytes()).unwrap();

        let (state, outcome) = SessionState::load(&storage, &profile);
        assert_eq!(outcome, LoadOutcome::Restored);

        let bucket = state.store.bucket(&BucketKey::new("CAS", "CONC"));
        assert_eq!(bucket, [1016.0, 984.0, 1000.0]); // z defaults
    }
}
