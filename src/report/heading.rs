//! Heading detection for blocks of model output.
//!
//! The model is asked to structure its answer section by section, but the
//! actual text comes back loosely formatted: sometimes the exact English
//! titles from the prompt, sometimes translated or reworded headings,
//! sometimes none at all. Detection runs two checks in order:
//!
//! 1. Exact match against the known section titles from the prompt
//!    (case-insensitive, tolerating a leading "- " and a trailing ":").
//! 2. A generic heading-shape match that catches translated or
//!    model-invented headings.
//!
//! Short declarative sentences can slip through check 2. That is a known
//! limit of the heuristic and left as is.

use regex::Regex;
use std::sync::OnceLock;

/// Section titles the prompt asks the model to use. The model usually
/// echoes these verbatim even when the body text is translated.
pub const KNOWN_SECTION_TITLES: &[&str] = &[
    "About Your Coin",
    "Requested Analysis",
    "Grade and Condition",
    "The Four Pillars of Grading Defined",
    "Problem Coin Assessment",
    "Mintage and Rarity",
    "Recent Sales Data",
    "Grade Comparison",
    "Coin Fingerprint (Descriptive)",
    "Other Specific Questions",
    "Analysis Overview",
];

/// What the first line of a block turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockLead {
    /// The line is a section heading with this title.
    Heading(String),
    /// The line is ordinary content.
    Content,
}

/// Classify the first line of a block as heading or content.
///
/// `sole_line` is true when the block consists of only this line —
/// a line standing alone is more likely to be a heading.
pub fn classify_block_lead(first_line: &str, sole_line: bool) -> BlockLead {
    if let Some(title) = match_known_title(first_line) {
        return BlockLead::Heading(title.to_string());
    }
    if let Some(title) = match_generic_heading(first_line, sole_line) {
        return BlockLead::Heading(title);
    }
    BlockLead::Content
}

/// Strip the decorations a heading line may carry: surrounding
/// whitespace, a leading "- " bullet, and a single trailing colon.
fn strip_heading_decorations(line: &str) -> &str {
    let mut s = line.trim();
    if let Some(rest) = s.strip_prefix('-') {
        s = rest.trim_start();
    }
    if let Some(rest) = s.strip_suffix(':') {
        s = rest.trim_end();
    }
    s
}

/// Match against the known prompt titles, returning the canonical form.
fn match_known_title(line: &str) -> Option<&'static str> {
    let stripped = strip_heading_decorations(line);
    KNOWN_SECTION_TITLES
        .iter()
        .find(|known| stripped.eq_ignore_ascii_case(known))
        .copied()
}

/// Shape of a plausible heading: starts with an uppercase letter, then
/// 3-80 letters/digits and light punctuation, optionally ending with a
/// colon. Deliberately excludes sentence punctuation so prose is rejected.
fn generic_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:-\s*)?([A-ZÀ-ÖØ-Þ][A-Za-zÀ-ÖØ-öø-ÿ0-9_()\s,/'-]{3,80})(:)?\s*$",
        )
        .expect("heading regex is valid")
    })
}

/// Generic heading-shape detection for titles the exact match missed
/// (translated headings, model-invented section names).
fn match_generic_heading(line: &str, sole_line: bool) -> Option<String> {
    let caps = generic_heading_regex().captures(line)?;
    let title = caps.get(1)?.as_str().trim().to_string();
    let has_colon = caps.get(2).is_some();

    let word_count = title.split_whitespace().count();
    let ends_with_sentence_punct =
        title.ends_with('.') || title.ends_with('!') || title.ends_with('?');

    if word_count > 12 || (ends_with_sentence_punct && !has_colon) {
        return None;
    }
    // A multi-line block only yields a heading when the line is short
    // enough to plausibly be one.
    if sole_line || line.trim().len() < 100 {
        Some(title)
    } else {
        None
    }
}
