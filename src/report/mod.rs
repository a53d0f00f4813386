//! Report segmentation: turns the model's free-text analysis into an
//! ordered list of titled sections.
//!
//! The model is asked to answer section by section, but the raw text has
//! no guaranteed structure. Segmentation walks blank-line-separated
//! blocks, recognizes headings (heading.rs), accumulates body text under
//! the current heading, and finally normalizes the sales disclaimer so it
//! appears exactly once, flagged for distinct styling.
//!
//! `segment` is a total function: empty input, heading-free prose and
//! ambiguous lines all produce a well-formed (possibly empty) result.
//! It performs no I/O and holds no state.

pub mod heading;
pub mod titles;

use heading::{classify_block_lead, BlockLead};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Title given to content that precedes the first recognized heading.
pub const DEFAULT_SECTION_TITLE: &str = "Analysis Overview";

/// Canonical title of the singleton disclaimer section.
pub const DISCLAIMER_TITLE: &str = "Important Disclaimer";

/// Titles (lowercase) under which the model reports sales data. The
/// model sometimes answers with a translated heading, so the known
/// translations are matched too.
const SALES_DATA_TITLE_VARIANTS: &[&str] = &[
    "recent sales data",
    "datos de ventas recientes",
    "données de ventes récentes",
];

/// One titled span of the analysis text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
    pub title: String,
    pub content: String,
    pub is_disclaimer: bool,
}

/// Blocks are separated by one or more blank lines (whitespace-only
/// lines count as blank).
fn block_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("block separator regex is valid"))
}

/// Split the raw model response into titled sections.
///
/// `disclaimer_text` is the sales disclaimer in the language the model
/// was asked to answer in; it is matched verbatim. Guarantees:
///
/// - at most one section has `is_disclaimer == true`;
/// - non-disclaimer sections keep their order of first appearance;
/// - a synthetic disclaimer, when needed, is appended last;
/// - the disclaimer text never also appears inside a sales-data section.
pub fn segment(raw_text: &str, disclaimer_text: &str) -> Vec<AnalysisSection> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    // Pass 1: block walk. Accumulate content under the current title,
    // starting a new accumulator whenever a heading is recognized.
    let mut sections: Vec<(String, String)> = Vec::new();
    let mut current_title = DEFAULT_SECTION_TITLE.to_string();
    let mut current_content = String::new();

    for block in block_separator_regex().split(text) {
        let mut lines = block.split('\n');
        let first_line = lines.next().unwrap_or("").trim();
        let rest: Vec<&str> = lines.collect();

        match classify_block_lead(first_line, rest.is_empty()) {
            BlockLead::Heading(title) => {
                if !current_content.trim().is_empty() {
                    sections.push((current_title, current_content.trim().to_string()));
                }
                current_title = title;
                current_content = rest.join("\n");
            }
            BlockLead::Content => {
                if !current_content.is_empty() {
                    current_content.push_str("\n\n");
                }
                current_content.push_str(block);
            }
        }
    }
    if !current_content.trim().is_empty() {
        sections.push((current_title, current_content.trim().to_string()));
    }

    // Pass 2: disclaimer normalization.
    let mut out: Vec<AnalysisSection> = Vec::new();
    let mut sales_section_seen = false;
    let mut disclaimer_seen = false;

    for (title, content) in sections {
        let mut title = title;
        let mut content = content;
        let mut is_disclaimer = false;

        let is_verbatim_disclaimer = content.trim() == disclaimer_text;
        let is_titled_disclaimer =
            title.eq_ignore_ascii_case(DISCLAIMER_TITLE) && content.trim() == disclaimer_text;

        if is_verbatim_disclaimer || is_titled_disclaimer {
            is_disclaimer = true;
            disclaimer_seen = true;
            title = DISCLAIMER_TITLE.to_string();
            content = disclaimer_text.to_string();
        } else {
            let title_lower = title.to_lowercase();
            if SALES_DATA_TITLE_VARIANTS.iter().any(|v| title_lower.contains(v)) {
                sales_section_seen = true;
                // The model sometimes repeats the disclaimer inline here;
                // it gets its own section below instead.
                if content.contains(disclaimer_text) {
                    content = content.replace(disclaimer_text, "").trim().to_string();
                }
            }
        }

        if !content.trim().is_empty() || is_disclaimer {
            out.push(AnalysisSection {
                title,
                content: content.trim().to_string(),
                is_disclaimer,
            });
        }
    }

    // A sales section without a disclaimer gets a synthetic one appended.
    // Drop any stray plain-text copy first so it is not shown twice.
    if sales_section_seen && !disclaimer_seen {
        if let Some(idx) = out
            .iter()
            .position(|s| !s.is_disclaimer && s.content == disclaimer_text)
        {
            out.remove(idx);
        }
        out.push(AnalysisSection {
            title: DISCLAIMER_TITLE.to_string(),
            content: disclaimer_text.to_string(),
            is_disclaimer: true,
        });
    }

    out
}
