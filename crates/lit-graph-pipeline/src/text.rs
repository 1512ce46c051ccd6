//! Text cleanup and clause splitting.

/// Clean a passage before classification: collapse whitespace runs into
/// single spaces and drop special characters, keeping letters, digits,
/// underscores, and spaces.
///
/// ```
/// use lit_graph_pipeline::text::clean_text;
///
/// assert_eq!(clean_text("  The  android -- wept!  "), "The android wept");
/// ```
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_alphanumeric() || c == '_' {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// Clause boundary markers, checked case-insensitively.
///
/// Semicolons and contrastive conjunctions reliably separate the themes of
/// a sentence; coordinating "and" does not, so it is left alone.
const CLAUSE_MARKERS: [&str; 3] = ["; ", " while ", " whereas "];

/// Split a passage into clauses for concept resolution.
///
/// A sentence like "Deckard exemplifies posthuman ethics while Isidore
/// questions animal ethics" carries two themes; resolving per clause lets
/// each half contribute its own mention fact. Passages without a marker
/// come back whole.
pub fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = vec![text.to_string()];
    for marker in CLAUSE_MARKERS {
        clauses = clauses
            .iter()
            .flat_map(|clause| split_on_marker(clause, marker))
            .collect();
    }
    clauses
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

fn split_on_marker(text: &str, marker: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    if lower.len() != text.len() {
        // Lowercasing shifted byte offsets (non-ASCII edge case); marker
        // positions would not line up, so leave the clause whole.
        return vec![text.to_string()];
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut search = 0;
    while let Some(found) = lower[search..].find(marker) {
        let at = search + found;
        pieces.push(text[start..at].to_string());
        start = at + marker.len();
        search = start;
    }
    pieces.push(text[start..].to_string());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a\t b\n\nc"), "a b c");
    }

    #[test]
    fn clean_text_strips_punctuation() {
        assert_eq!(clean_text("Rick's \"sheep\"?"), "Ricks sheep");
    }

    #[test]
    fn split_on_while_yields_two_clauses() {
        let clauses =
            split_clauses("Deckard exemplifies posthuman ethics while Isidore questions animal ethics");
        assert_eq!(clauses.len(), 2);
        assert!(clauses[0].contains("Deckard"));
        assert!(clauses[1].contains("Isidore"));
    }

    #[test]
    fn split_is_case_insensitive() {
        let clauses = split_clauses("He resisted; she doubted it WHILE the city burned");
        assert_eq!(clauses.len(), 3);
    }

    #[test]
    fn unmarked_text_stays_whole() {
        let clauses = split_clauses("The toad blinked and hopped away");
        assert_eq!(clauses, vec!["The toad blinked and hopped away"]);
    }
}
