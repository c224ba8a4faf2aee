//! Keyword extraction from free-text questions.
//!
//! Turns a raw question into the normalized term set that drives candidate
//! retrieval. Pure and deterministic; an empty result is a valid outcome
//! (e.g. a question made only of stop words or punctuation) and switches the
//! retriever into phrase-fallback mode.

use notem_core::defaults::KEYWORD_MIN_CHARS;

/// Closed set of common English function words dropped during extraction.
pub const STOP_WORDS: &[&str] = &[
    "what", "is", "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
    "with", "by", "my", "your", "his", "her", "their", "this", "that", "it", "tell", "me",
    "about", "how", "please", "can", "you",
];

/// Whether a normalized token is in the stop-word list.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Purely numeric tokens are always kept; they may be meaningful dates or
/// quantities ("10", "2024").
fn is_numeric(token: &str) -> bool {
    token.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false)
}

/// Extract normalized query terms from a question.
///
/// Lowercases the text, strips punctuation, splits on whitespace, then keeps
/// a token iff it is numeric, or it is neither a stop word nor shorter than
/// [`KEYWORD_MIN_CHARS`]. Duplicates are removed; first-seen order is
/// preserved so downstream pattern construction is deterministic.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut keywords = Vec::new();
    for token in normalized.split_whitespace() {
        let keep = is_numeric(token)
            || (!is_stop_word(token) && token.chars().count() >= KEYWORD_MIN_CHARS);
        if keep && !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        let keywords = extract_keywords("What did I see in Kyoto?");
        assert_eq!(keywords, vec!["did".to_string(), "see".to_string(), "kyoto".to_string()]);
    }

    #[test]
    fn test_stop_words_dropped() {
        let keywords = extract_keywords("tell me about the trip");
        assert_eq!(keywords, vec!["trip".to_string()]);
    }

    #[test]
    fn test_only_stop_words_yields_empty() {
        assert!(extract_keywords("what is the and or but").is_empty());
    }

    #[test]
    fn test_only_punctuation_yields_empty() {
        assert!(extract_keywords("??").is_empty());
        assert!(extract_keywords("!!! ... ---").is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_short_tokens_dropped() {
        // "go" is not a stop word but is below the length floor
        assert!(extract_keywords("go up").is_empty());
    }

    #[test]
    fn test_numeric_tokens_kept_regardless_of_length() {
        let keywords = extract_keywords("top 10 in 2024");
        assert_eq!(keywords, vec!["top".to_string(), "10".to_string(), "2024".to_string()]);
    }

    #[test]
    fn test_punctuation_stripped_from_tokens() {
        let keywords = extract_keywords("kyoto's temples, gardens!");
        assert_eq!(
            keywords,
            vec!["kyoto".to_string(), "temples".to_string(), "gardens".to_string()]
        );
    }

    #[test]
    fn test_lowercasing() {
        let keywords = extract_keywords("KYOTO Temples");
        assert_eq!(keywords, vec!["kyoto".to_string(), "temples".to_string()]);
    }

    #[test]
    fn test_duplicates_removed_first_seen_order() {
        let keywords = extract_keywords("temples kyoto temples kyoto temples");
        assert_eq!(keywords, vec!["temples".to_string(), "kyoto".to_string()]);
    }

    #[test]
    fn test_deterministic() {
        let question = "Where did I park the car near gate 3?";
        assert_eq!(extract_keywords(question), extract_keywords(question));
    }

    #[test]
    fn test_nan_and_inf_are_not_numeric() {
        // f64 parsing accepts these spellings; the extractor must not treat
        // them as numbers (they are ordinary short tokens)
        assert!(!is_numeric("nan"));
        assert!(!is_numeric("inf"));
        assert!(is_numeric("42"));
        assert!(is_numeric("1e5"));
    }
}
