//! Cleanup and acceptance checks for text returned by the generation model.
//!
//! The raw model output is trimmed, unwrapped from quotes, and collapsed
//! before the length bounds are applied. A result outside the bounds is a
//! generation failure, not an input validation failure, and is never
//! returned to the caller.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum accepted length of a cleaned prompt, in characters.
pub const MIN_PROMPT_CHARS: usize = 20;

/// Maximum accepted length of a cleaned prompt, in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// A cleaned, accepted generation result with its derived metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedPrompt {
    pub text: String,
    pub word_count: usize,
    pub character_count: usize,
}

/// Reasons a generation result is rejected after cleanup.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PromptRejection {
    #[error("generated prompt was empty")]
    Empty,

    #[error("generated prompt too short after cleanup ({0} chars, minimum {MIN_PROMPT_CHARS})")]
    TooShort(usize),

    #[error("generated prompt too long after cleanup ({0} chars, maximum {MAX_PROMPT_CHARS})")]
    TooLong(usize),
}

fn blank_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("static regex must compile"))
}

/// Remove at most one wrapping quote character from each end.
fn strip_wrapping_quotes(text: &str) -> &str {
    let mut out = text;
    if let Some(rest) = out.strip_prefix('"').or_else(|| out.strip_prefix('\'')) {
        out = rest;
    }
    if let Some(rest) = out.strip_suffix('"').or_else(|| out.strip_suffix('\'')) {
        out = rest;
    }
    out
}

/// Clean a raw generation result and enforce the acceptance bounds.
///
/// Cleanup: trim, strip one layer of wrapping quotes, collapse runs of
/// blank lines into a single newline, trim again. The cleaned text must
/// be between [`MIN_PROMPT_CHARS`] and [`MAX_PROMPT_CHARS`] characters.
pub fn sanitize_generated_prompt(raw: &str) -> Result<SanitizedPrompt, PromptRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PromptRejection::Empty);
    }

    let unquoted = strip_wrapping_quotes(trimmed);
    let collapsed = blank_line_re().replace_all(unquoted, "\n");
    let text = collapsed.trim().to_string();

    let character_count = text.chars().count();
    if character_count < MIN_PROMPT_CHARS {
        return Err(PromptRejection::TooShort(character_count));
    }
    if character_count > MAX_PROMPT_CHARS {
        return Err(PromptRejection::TooLong(character_count));
    }

    let word_count = text.split_whitespace().count();

    Ok(SanitizedPrompt {
        text,
        word_count,
        character_count,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
