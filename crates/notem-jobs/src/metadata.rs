//! Metadata prompt construction and model-output decoding.
//!
//! The model's free text is never trusted directly: surrounding code fences
//! are stripped, the remainder is decoded as a structured object, and both
//! fields are validated before anything touches storage.

use serde::Deserialize;

use notem_core::{Error, Result};

/// Decoded, validated enrichment result.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NoteMetadata {
    pub summary: String,
    pub tags: Vec<String>,
}

/// Build the enrichment prompt for one note.
pub fn metadata_prompt(title: &str, content: &str) -> String {
    format!(
        "Analyze the following note and provide:\n\
         1. A short summary (max 3 sentences).\n\
         2. A list of 3-5 relevant tags (lowercase, single words).\n\
         \n\
         Note Title: {title}\n\
         Note Content: {content}\n\
         \n\
         Output strictly in JSON format:\n\
         {{\n\
           \"summary\": \"string\",\n\
           \"tags\": [\"string\", \"string\"]\n\
         }}"
    )
}

/// Remove markdown code-fence markers the model tends to wrap JSON in.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode and validate a raw model response into [`NoteMetadata`].
///
/// Fails if the text is not valid JSON for the expected shape, the summary
/// is empty, or no usable tag survives normalization. Tags are lowercased
/// and trimmed; the model is instructed to send them that way but is not
/// trusted to.
pub fn parse_metadata(raw: &str) -> Result<NoteMetadata> {
    let cleaned = strip_code_fences(raw);
    let decoded: NoteMetadata = serde_json::from_str(&cleaned)
        .map_err(|e| Error::Job(format!("metadata decode failed: {}", e)))?;

    let summary = decoded.summary.trim().to_string();
    if summary.is_empty() {
        return Err(Error::Job("metadata missing summary".to_string()));
    }

    let tags: Vec<String> = decoded
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(Error::Job("metadata missing tags".to_string()));
    }

    Ok(NoteMetadata { summary, tags })
}
