//! Extraction and validation of generated game documents.
//!
//! The generation backend is instructed to wrap its output in a fenced
//! ```html block and to place all game content inside a `game-container`
//! div. Model output is untrusted text: nothing is persisted until a
//! complete document has been extracted from it.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::CoreError;

/// Seed document for a game with no generated content yet, and the baseline
/// handed to the generator when a request is not iterating on an existing
/// version.
pub const PLACEHOLDER_HTML: &str = "<div>New Game</div>";

/// Marker element every generated document must contain.
const GAME_CONTAINER_MARKER: &str = "<div id=\"game-container\"";

fn html_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```html(.*?)```").expect("static regex"))
}

/// Extract the game document from raw generator output.
///
/// Pulls the first fenced ```html block and verifies it contains the
/// `game-container` div. Returns [`CoreError::Generation`] when no block is
/// present or the document is missing the marker, so callers persist
/// nothing for unusable output.
pub fn extract_game_document(raw: &str) -> Result<String, CoreError> {
    let block = html_fence_regex()
        .captures(raw)
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            CoreError::Generation("no HTML code block found in generator output".to_string())
        })?;

    let document = block.as_str().trim();
    if !document.contains(GAME_CONTAINER_MARKER) {
        return Err(CoreError::Generation(
            "generated document is missing the game-container element".to_string(),
        ));
    }

    Ok(document.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(doc: &str) -> String {
        format!("Sure, here is your game:\n```html\n{doc}\n```\nEnjoy!")
    }

    const MINIMAL_DOC: &str = "<!DOCTYPE html>\n<html><head></head><body>\
        <div id=\"game-container\"><canvas></canvas></div></body></html>";

    #[test]
    fn extracts_fenced_document() {
        let out = extract_game_document(&wrapped(MINIMAL_DOC)).unwrap();
        assert_eq!(out, MINIMAL_DOC);
    }

    #[test]
    fn extracts_first_block_when_several_present() {
        let raw = format!("{}\n```html\n<div>other</div>\n```", wrapped(MINIMAL_DOC));
        let out = extract_game_document(&raw).unwrap();
        assert_eq!(out, MINIMAL_DOC);
    }

    #[test]
    fn rejects_output_without_code_block() {
        let err = extract_game_document("I cannot produce a game today.").unwrap_err();
        assert!(matches!(err, CoreError::Generation(_)));
    }

    #[test]
    fn rejects_document_without_game_container() {
        let raw = wrapped("<!DOCTYPE html><html><body><p>hello</p></body></html>");
        let err = extract_game_document(&raw).unwrap_err();
        assert!(matches!(err, CoreError::Generation(_)));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let raw = format!("```html\n\n  {MINIMAL_DOC}\n\n```");
        let out = extract_game_document(&raw).unwrap();
        assert_eq!(out, MINIMAL_DOC);
    }
}
