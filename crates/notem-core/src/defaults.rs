//! Centralized default constants for the notem system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// RETRIEVAL
// =============================================================================

/// Maximum number of candidate notes pulled from storage per question.
/// Bounds the work the in-process ranker has to do.
pub const RETRIEVAL_LIMIT: i64 = 10;

/// Hard cap on notes admitted into the generation context. Bounds prompt
/// size and the surface for hallucinated citations.
pub const CONTEXT_NOTES_MAX: usize = 5;

/// Maximum characters of note content included per context block.
pub const SNIPPET_MAX_CHARS: usize = 800;

/// Minimum token length kept by the keyword extractor (numeric tokens are
/// exempt).
pub const KEYWORD_MIN_CHARS: usize = 3;

// =============================================================================
// QUESTIONS
// =============================================================================

/// Maximum question length in characters.
pub const QUESTION_MAX_CHARS: usize = 500;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for note listing.
pub const PAGE_LIMIT: i64 = 50;

/// Default page size for chat history.
pub const CHAT_HISTORY_LIMIT: i64 = 20;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama base URL.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default generation model name (Ollama).
pub const GEN_MODEL: &str = "gpt-oss:20b";

/// Timeout for generation requests in seconds. The answer path blocks a
/// request on this call, so it is kept short; past the timeout the call
/// fails as an availability error.
pub const GEN_TIMEOUT_SECS: u64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_cap_within_retrieval_limit() {
        assert!((CONTEXT_NOTES_MAX as i64) <= RETRIEVAL_LIMIT);
    }

    #[test]
    fn test_question_bound_positive() {
        assert!(QUESTION_MAX_CHARS > 0);
    }
}
