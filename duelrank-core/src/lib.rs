/// duelrank-core: Pairwise-comparison ranking engine.
///
/// Human A/B duels → Elo updates → segmented rankings. No filesystem
/// paths, no terminal IO — persistence goes through a `Storage`
/// collaborator the caller supplies.
///
/// Ratings are segmented twice: by viewer segment and by decision context.
/// Each (segment, context) pair owns an independent bucket of per-item
/// ratings; a vote recorded under one bucket never moves another.
///
/// # Quick start
///
/// ```rust
/// use duelrank_core::{DuelSession, Labeled, MemoryStorage, Profile, Winner};
///
/// let items = vec!["Crimson Tide".to_string(), "Night Owl".to_string()];
/// let profile = Profile::new(
///     &items,
///     vec![Labeled { id: "CAS".into(), label: "Casual".into() }],
///     vec![Labeled { id: "CONC".into(), label: "Which feels busier?".into() }],
/// );
///
/// let (mut session, _outcome) = DuelSession::open(profile, MemoryStorage::new());
/// let mut rng = rand::rng();
///
/// let (left, right) = session.new_duel(&mut rng);
/// println!("{} vs {}", left, right);
/// session.submit_vote(Winner::A, &mut rng).unwrap();
///
/// for (rank, r) in session.top(10).iter().enumerate() {
///     println!("{}. {} ({:.1})", rank + 1, r.item, r.rating);
/// }
/// ```

pub mod bucket;
pub mod commands;
pub mod constants;
pub mod duel;
pub mod elo;
pub mod export;
pub mod ledger;
pub mod profile;
pub mod session;
pub mod types;

// Re-export primary public API at crate root.
pub use bucket::BucketStore;
pub use commands::DuelSession;
pub use duel::pick_pair;
pub use elo::{apply_outcome, expected_score};
pub use export::export_csv;
pub use ledger::{VoteLedger, VoteRecord};
pub use profile::Profile;
pub use session::{LoadOutcome, MemoryStorage, SessionError, SessionState, Storage};
pub use types::{BucketKey, Catalog, Labeled, RankedItem, Winner};
