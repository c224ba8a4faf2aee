//! Relevance ranking of retrieved candidates.
//!
//! Retrieval is a broad, high-recall filter; this pass orders candidates by
//! keyword overlap and truncates to the context cap. Sorting is stable, so
//! candidates with equal overlap keep the retriever's recency order.

use std::cmp::Reverse;

use tracing::trace;

use notem_core::Note;

/// Count how many distinct keywords occur (case-insensitive) in the
/// concatenation of a note's title and content.
pub fn keyword_overlap(note: &Note, keywords: &[String]) -> usize {
    let haystack = format!("{}{}", note.title, note.content).to_lowercase();
    keywords.iter().filter(|k| haystack.contains(k.as_str())).count()
}

/// Order candidates by descending keyword overlap and truncate to `cap`.
///
/// With an empty keyword set, ranking is skipped entirely and the incoming
/// (recency) order is preserved. The returned list never exceeds `cap`; an
/// empty result tells the caller to short-circuit without consulting the
/// generative model.
pub fn rank_candidates(mut candidates: Vec<Note>, keywords: &[String], cap: usize) -> Vec<Note> {
    if !keywords.is_empty() {
        candidates.sort_by_key(|note| Reverse(keyword_overlap(note, keywords)));
    }
    candidates.truncate(cap);

    for note in &candidates {
        trace!(
            note_id = %note.id,
            overlap = keyword_overlap(note, keywords),
            "ranked candidate"
        );
    }
    candidates
}
