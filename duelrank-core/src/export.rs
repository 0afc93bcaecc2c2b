/// CSV export of the vote ledger.
use crate::ledger::VoteRecord;

/// Column order matches the persisted vote fields.
const HEADERS: [&str; 7] = ["ts", "segmento", "contexto", "A", "B", "ganador", "perdedor"];

/// Render the full vote sequence as CSV. Every field is double-quoted and
/// embedded quotes are doubled. Returns `None` when there is nothing to
/// export, so callers can report that instead of writing an empty file.
pub fn export_csv(votes: &[VoteRecord]) -> Option<String> {
    if votes.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(votes.len() + 1);
    lines.push(HEADERS.join(","));

    for v in votes {
        let fields = [
            v.ts.as_str(),
            v.segment.as_str(),
            v.context.as_str(),
            v.item_a.as_str(),
            v.item_b.as_str(),
            v.winner.as_str(),
            v.loser.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        lines.push(row.join(","));
    }

    Some(lines.join("\n"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::VoteLedger;
    use crate::types::Winner;

    #[test]
    fn test_empty_ledger_exports_nothing() {
        assert_eq!(export_csv(&[]), None);
    }

    #[test]
    fn test_header_and_rows() {
        let mut ledger = VoteLedger::new();
        ledger.record_at(
            "2026-08-06T10:00:00.000Z".to_string(),
            "Casual",
            "Which feels busier?",
            "Alpha",
            "Beta",
            Winner::A,
        );
        ledger.record_at(
            "2026-08-06T10:00:05.000Z".to_string(),
            "Casual",
            "Which feels busier?",
            "Beta",
            "Gamma",
            Winner::B,
        );

        let csv = export_csv(ledger.votes()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ts,segmento,contexto,A,B,ganador,perdedor");
        assert_eq!(
            lines[1],
            "\"2026-08-06T10:00:00.000Z\",\"Casual\",\"Which feels busier?\",\"Alpha\",\"Beta\",\"Alpha\",\"Beta\""
        );
        assert_eq!(
            lines[2],
            "\"2026-08-06T10:00:05.000Z\",\"Casual\",\"Which feels busier?\",\"Beta\",\"Gamma\",\"Gamma\",\"Beta\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut ledger = VoteLedger::new();
        ledger.record_at(
            "2026-08-06T10:00:00.000Z".to_string(),
            "Casual",
            "Busier?",
            "The \"Big\" One",
            "Beta",
            Winner::A,
        );

        let csv = export_csv(ledger.votes()).unwrap();
        assert!(csv.contains("\"The \"\"Big\"\" One\""));
    }
}
