/// Append-only vote ledger.
///
/// Every decision is recorded as an immutable fact. Entries are never
/// mutated or removed; the only thing that empties the ledger is a full
/// session reset.
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Winner;

/// One recorded decision.
///
/// Wire field names match the persisted and exported format:
/// `ts, segmento, contexto, A, B, ganador, perdedor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub ts: String,
    #[serde(rename = "segmento")]
    pub segment: String,
    #[serde(rename = "contexto")]
    pub context: String,
    #[serde(rename = "A")]
    pub item_a: String,
    #[serde(rename = "B")]
    pub item_b: String,
    #[serde(rename = "ganador")]
    pub winner: String,
    #[serde(rename = "perdedor")]
    pub loser: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: Vec<VoteRecord>,
}

impl VoteLedger {
    pub fn new() -> Self {
        VoteLedger::default()
    }

    pub fn from_votes(votes: Vec<VoteRecord>) -> Self {
        VoteLedger { votes }
    }

    /// Append a decision stamped with the current UTC time.
    pub fn record(
        &mut self,
        segment_label: &str,
        context_label: &str,
        item_a: &str,
        item_b: &str,
        winner: Winner,
    ) -> &VoteRecord {
        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.record_at(ts, segment_label, context_label, item_a, item_b, winner)
    }

    /// Append a decision with an explicit timestamp. `record` is the
    /// production entry point; tests use this seam for reproducible output.
    pub fn record_at(
        &mut self,
        ts: String,
        segment_label: &str,
        context_label: &str,
        item_a: &str,
        item_b: &str,
        winner: Winner,
    ) -> &VoteRecord {
        let (winner_name, loser_name) = match winner {
            Winner::A => (item_a, item_b),
            Winner::B => (item_b, item_a),
        };

        self.votes.push(VoteRecord {
            ts,
            segment: segment_label.to_string(),
            context: context_label.to_string(),
            item_a: item_a.to_string(),
            item_b: item_b.to_string(),
            winner: winner_name.to_string(),
            loser: loser_name.to_string(),
        });
        self.votes.last().expect("push appended a record")
    }

    pub fn votes(&self) -> &[VoteRecord] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_computes_loser() {
        let mut ledger = VoteLedger::new();
        let vote = ledger.record_at(
            "2026-08-06T10:00:00.000Z".to_string(),
            "Casual",
            "Which feels busier?",
            "Alpha",
            "Beta",
            Winner::B,
        );
        assert_eq!(vote.winner, "Beta");
        assert_eq!(vote.loser, "Alpha");
        assert_eq!(vote.item_a, "Alpha");
        assert_eq!(vote.item_b, "Beta");
    }

    #[test]
    fn test_ledger_preserves_order() {
        let mut ledger = VoteLedger::new();
        for i in 0..3 {
            ledger.record_at(
                format!("2026-08-06T10:00:0{i}.000Z"),
                "Casual",
                "Busier?",
                "Alpha",
                "Beta",
                Winner::A,
            );
        }
        assert_eq!(ledger.len(), 3);
        let stamps: Vec<&str> = ledger.votes().iter().map(|v| v.ts.as_str()).collect();
        assert_eq!(
            stamps,
            [
                "2026-08-06T10:00:00.000Z",
                "2026-08-06T10:00:01.000Z",
                "2026-08-06T10:00:02.000Z",
            ]
        );
    }

    #[test]
    fn test_record_stamps_parseable_time() {
        let mut ledger = VoteLedger::new();
        let vote = ledger.record("Casual", "Busier?", "Alpha", "Beta", Winner::A);
        assert!(chrono::DateTime::parse_from_rfc3339(&vote.ts).is_ok());
    }

    #[test]
    fn test_vote_record_wire_field_names() {
        let mut ledger = VoteLedger::new();
        ledger.record_at(
            "2026-08-06T10:00:00.000Z".to_string(),
            "Casual",
            "Busier?",
            "Alpha",
            "Beta",
            Winner::A,
        );

        let value = serde_json::to_value(&ledger.votes()[0]).unwrap();
        let obj = value.as_object().unwrap();
        for field in ["ts", "segmento", "contexto", "A", "B", "ganador", "perdedor"] {
            assert!(obj.contains_key(field), "missing wire field {field}");
        }
        assert_eq!(obj.len(), 7);
    }
}
