/// The command surface a presentation layer drives.
///
/// `DuelSession` owns the profile, the session state, the storage handle,
/// and the active (segment, context) selection. The presentation layer
/// never touches ratings directly: it selects, asks for duels, submits
/// votes, and reads rankings back. Every vote runs the full synchronous
/// sequence {Elo update, ledger append, persist, fresh pair}.
use rand::Rng;

use crate::duel;
use crate::elo;
use crate::export;
use crate::profile::Profile;
use crate::session::{LoadOutcome, SessionError, SessionState, Storage};
use crate::types::{BucketKey, RankedItem, Winner};

pub struct DuelSession<S: Storage> {
    profile: Profile,
    storage: S,
    state: SessionState,
    segment: String,
    context: String,
    current_pair: Option<(usize, usize)>,
}

impl<S: Storage> DuelSession<S> {
    /// Load-or-initialize a session. The profile's first segment and first
    /// context are active until the caller selects others.
    pub fn open(profile: Profile, storage: S) -> (Self, LoadOutcome) {
        let (state, outcome) = SessionState::load(&storage, &profile);
        let segment = profile.segments[0].id.clone();
        let context = profile.contexts[0].id.clone();
        (
            DuelSession {
                profile,
                storage,
                state,
                segment,
                context,
                current_pair: None,
            },
            outcome,
        )
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn vote_count(&self) -> usize {
        self.state.ledger.len()
    }

    pub fn active_segment(&self) -> &str {
        &self.segment
    }

    pub fn active_context(&self) -> &str {
        &self.context
    }

    /// Question text of the active context.
    pub fn question(&self) -> &str {
        self.profile
            .context_label(&self.context)
            .expect("active context is always a profile context")
    }

    /// Switch the active segment. Ids are validated by the caller against
    /// the profile; an unknown id here is a wiring bug.
    pub fn select_segment(&mut self, id: &str) {
        assert!(
            self.profile.segment_label(id).is_some(),
            "Unknown segment id: {}",
            id
        );
        self.segment = id.to_string();
    }

    /// Switch the active context. Same contract as `select_segment`.
    pub fn select_context(&mut self, id: &str) {
        assert!(
            self.profile.context_label(id).is_some(),
            "Unknown context id: {}",
            id
        );
        self.context = id.to_string();
    }

    /// Draw a fresh random pair and make it current. Returns the two item
    /// names in presentation order.
    pub fn new_duel(&mut self, rng: &mut impl Rng) -> (&str, &str) {
        let pair = duel::pick_pair(self.profile.catalog.len(), rng);
        self.current_pair = Some(pair);
        (
            self.profile.catalog.name(pair.0),
            self.profile.catalog.name(pair.1),
        )
    }

    /// The pair currently on display, if any.
    pub fn current_pair(&self) -> Option<(&str, &str)> {
        self.current_pair.map(|(a, b)| {
            (self.profile.catalog.name(a), self.profile.catalog.name(b))
        })
    }

    /// Record the decision for the current pair against the active bucket:
    /// Elo update, ledger append, persist, then a fresh pair (returned).
    /// Voting with no current pair is a contract violation.
    pub fn submit_vote(
        &mut self,
        winner: Winner,
        rng: &mut impl Rng,
    ) -> Result<(&str, &str), SessionError> {
        let (idx_a, idx_b) = self
            .current_pair
            .expect("submit_vote called before any duel was selected");

        let key = BucketKey::new(&self.segment, &self.context);
        elo::apply_outcome(
            self.state.store.bucket_mut(&key),
            idx_a,
            idx_b,
            winner,
            self.profile.k_factor,
        );

        let segment_label = self
            .profile
            .segment_label(&self.segment)
            .expect("active segment is always a profile segment");
        let context_label = self
            .profile
            .context_label(&self.context)
            .expect("active context is always a profile context");
        self.state.ledger.record(
            segment_label,
            context_label,
            self.profile.catalog.name(idx_a),
            self.profile.catalog.name(idx_b),
            winner,
        );

        self.state.save(&self.storage, &self.profile)?;
        Ok(self.new_duel(rng))
    }

    /// Top `n` rankings of the active (segment, context) bucket.
    pub fn top(&self, n: usize) -> Vec<RankedItem> {
        self.state.store.rankings(
            &self.profile.catalog,
            &BucketKey::new(&self.segment, &self.context),
            n,
        )
    }

    /// Discard all ratings and votes, persist the cleared aggregate, and
    /// drop the current pair.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::reset(&self.storage, &self.profile)?;
        self.current_pair = None;
        Ok(())
    }

    /// The full vote sequence as CSV, or `None` when no votes exist yet.
    pub fn export_csv(&self) -> Option<String> {
        export::export_csv(self.state.ledger.votes())
    }
}
