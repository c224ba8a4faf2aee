//! Context assembly for the generation prompt.
//!
//! Formats the ranked notes into the bounded textual context handed to the
//! generative model. Pure formatting; deterministic for a given input order.

use notem_core::defaults::SNIPPET_MAX_CHARS;
use notem_core::Note;

/// Separator between context blocks.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Marker emitted for notes that have not been enriched yet.
pub const NO_SUMMARY_MARKER: &str = "No summary";

/// Truncate content to at most `max_chars` characters, on a character
/// boundary, with a trailing ellipsis marker.
pub fn snippet(content: &str, max_chars: usize) -> String {
    let truncated: String = content.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// Format the ranked notes into one context string, one block per note.
pub fn assemble_context(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|note| {
            format!(
                "Source ID: {}\nTitle: {}\nSummary: {}\nContent Snippet: {}",
                note.id,
                note.title,
                note.summary.as_deref().unwrap_or(NO_SUMMARY_MARKER),
                snippet(&note.content, SNIPPET_MAX_CHARS),
            )
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn note(title: &str, content: &str, summary: Option<&str>) -> Note {
        Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            collection_id: None,
            title: title.to_string(),
            content: content.to_string(),
            summary: summary.map(String::from),
            tags: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_snippet_truncates_long_content() {
        let content = "a".repeat(2000);
        let s = snippet(&content, 800);
        assert_eq!(s.chars().count(), 803);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_snippet_short_content_keeps_marker() {
        assert_eq!(snippet("short", 800), "short...");
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        // Multibyte characters must not be split
        let content = "日本".repeat(600);
        let s = snippet(&content, 800);
        assert_eq!(s.chars().count(), 803);
    }

    #[test]
    fn test_block_contains_all_fields() {
        let n = note("Trip to Japan", "Kyoto temples", Some("A travel note."));
        let context = assemble_context(std::slice::from_ref(&n));
        assert!(context.contains(&format!("Source ID: {}", n.id)));
        assert!(context.contains("Title: Trip to Japan"));
        assert!(context.contains("Summary: A travel note."));
        assert!(context.contains("Content Snippet: Kyoto temples..."));
    }

    #[test]
    fn test_missing_summary_uses_marker() {
        let n = note("Grocery list", "milk", None);
        let context = assemble_context(std::slice::from_ref(&n));
        assert!(context.contains("Summary: No summary"));
    }

    #[test]
    fn test_blocks_joined_with_separator() {
        let notes = vec![note("a", "1", None), note("b", "2", None)];
        let context = assemble_context(&notes);
        assert_eq!(context.matches(CONTEXT_SEPARATOR).count(), 1);
        let first = context.split(CONTEXT_SEPARATOR).next().unwrap();
        assert!(first.contains("Title: a"));
    }

    #[test]
    fn test_empty_input_yields_empty_context() {
        assert_eq!(assemble_context(&[]), "");
    }

    #[test]
    fn test_deterministic_for_same_order() {
        let notes = vec![note("a", "1", None), note("b", "2", None)];
        assert_eq!(assemble_context(&notes), assemble_context(&notes));
    }
}
