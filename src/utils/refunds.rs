//! Refund metadata lives string-embedded in the pendapatan notes column
//! rather than in a separate audit table; these helpers own the marker
//! format and the naive parsing that reads it back for display.

#[derive(Debug, PartialEq, Eq)]
pub struct RefundNote {
    pub reason: String,
    pub processed_by: String,
    pub original_notes: String,
}

pub fn format_refund_note(reason: &str, processed_by: &str, prior_notes: Option<&str>) -> String {
    format!(
        "REFUND: {} | Processed by: {} | Original notes: {}",
        reason,
        processed_by,
        prior_notes.unwrap_or("N/A")
    )
}

/// Parse a refund marker written by [`format_refund_note`]. Returns `None`
/// for notes that never went through a refund.
pub fn parse_refund_note(notes: &str) -> Option<RefundNote> {
    let rest = notes.strip_prefix("REFUND: ")?;
    let (reason, rest) = rest.split_once(" | Processed by: ")?;
    let (processed_by, original_notes) = rest.split_once(" | Original notes: ")?;
    Some(RefundNote {
        reason: reason.to_string(),
        processed_by: processed_by.to_string(),
        original_notes: original_notes.to_string(),
    })
}

/// Cancel-refund keeps history instead of clearing it.
pub fn cancelled_refund_note(prior_notes: Option<&str>) -> String {
    format!("[CANCELLED] {}", prior_notes.unwrap_or("")).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refund_note_round_trip() {
        let note = format_refund_note("Venue maintenance issues", "admin", Some("weekly slot"));
        let parsed = parse_refund_note(&note).unwrap();
        assert_eq!(parsed.reason, "Venue maintenance issues");
        assert_eq!(parsed.processed_by, "admin");
        assert_eq!(parsed.original_notes, "weekly slot");
    }

    #[test]
    fn missing_prior_notes_become_na() {
        let note = format_refund_note("Customer request", "admin", None);
        assert_eq!(parse_refund_note(&note).unwrap().original_notes, "N/A");
    }

    #[test]
    fn plain_notes_do_not_parse() {
        assert!(parse_refund_note("paid out on friday").is_none());
    }

    #[test]
    fn cancelled_marker_keeps_history() {
        let note = cancelled_refund_note(Some("REFUND: Test | Processed by: admin | Original notes: N/A"));
        assert!(note.starts_with("[CANCELLED] REFUND: Test"));
        assert_eq!(cancelled_refund_note(None), "[CANCELLED]");
    }
}
