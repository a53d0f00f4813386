//! Outbound search-query assembly.
//!
//! Builds the marketplace (eBay) and web-search (Google) query strings
//! from whatever coin facts the user supplied. Token order is fixed,
//! duplicates are dropped case-insensitively, and a query that ends up
//! with only generic filler falls back to a minimal default. Both
//! builders are total functions returning plain text; `marketplace_url`
//! and `web_search_url` do the percent-encoding.

use reqwest::Url;
use serde::{Deserialize, Serialize};

const MARKETPLACE_BASE: &str = "https://www.ebay.com/sch/i.html";
const WEB_SEARCH_BASE: &str = "https://www.google.com/search";

/// Generic tokens that never count as a "real" marketplace query on
/// their own.
const MARKETPLACE_FILLER: &[&str] = &["coin", "raw", "certified", "proof", "error", "variety", "toned"];

/// Same idea for web search.
const WEB_SEARCH_FILLER: &[&str] = &[
    "coin",
    "information",
    "value",
    "history",
    "mintage",
    "identification",
    "error",
    "variety",
];

/// The optional coin facts a query is assembled from. Constructed fresh
/// per user action and discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinQueryFacts {
    pub year: Option<String>,
    pub country: Option<String>,
    pub denomination: Option<String>,
    pub mint_mark: Option<String>,
    pub grading_agency: Option<String>,
    pub grade: Option<String>,
    pub is_graded: bool,
    /// Free-text questions; scanned for domain keywords.
    pub notes: Option<String>,
}

impl CoinQueryFacts {
    fn field(opt: &Option<String>) -> Option<&str> {
        opt.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn year(&self) -> Option<&str> {
        Self::field(&self.year)
    }
    fn country(&self) -> Option<&str> {
        Self::field(&self.country)
    }
    fn denomination(&self) -> Option<&str> {
        Self::field(&self.denomination)
    }
    fn mint_mark(&self) -> Option<&str> {
        Self::field(&self.mint_mark)
    }
    fn grading_agency(&self) -> Option<&str> {
        Self::field(&self.grading_agency)
    }
    fn grade(&self) -> Option<&str> {
        Self::field(&self.grade)
    }

    fn notes_lower(&self) -> String {
        self.notes.as_deref().unwrap_or("").to_lowercase()
    }

    /// Any of the identifying fields present (year, country,
    /// denomination, mint mark, grade).
    fn has_core_details(&self) -> bool {
        self.year().is_some()
            || self.country().is_some()
            || self.denomination().is_some()
            || self.mint_mark().is_some()
            || self.grade().is_some()
    }

    /// Identifying fields excluding grade — gates the "raw" token so a
    /// bare "raw coin" query never happens.
    fn has_identity_details(&self) -> bool {
        self.year().is_some()
            || self.country().is_some()
            || self.denomination().is_some()
            || self.mint_mark().is_some()
    }
}

/// Push a token unless an equal one (case-insensitive) is already there.
fn push_unique(tokens: &mut Vec<String>, token: &str) {
    if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        tokens.push(token.to_string());
    }
}

/// True when every token is generic filler.
fn only_filler(tokens: &[String], filler: &[&str]) -> bool {
    tokens
        .iter()
        .all(|t| filler.iter().any(|f| t.eq_ignore_ascii_case(f)))
}

/// Assemble the eBay search query.
///
/// Token order: year, country, denomination, mint mark, "coin", grading
/// info ("certified" when graded without a grade, "raw" when ungraded
/// but otherwise identified), then keywords lifted from the free-text
/// notes. Falls back to `"coin"` when nothing identifying was given.
pub fn build_marketplace_query(facts: &CoinQueryFacts) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for part in [facts.year(), facts.country(), facts.denomination(), facts.mint_mark()]
        .into_iter()
        .flatten()
    {
        push_unique(&mut tokens, part);
    }
    push_unique(&mut tokens, "coin");

    if facts.is_graded {
        if let Some(agency) = facts.grading_agency() {
            push_unique(&mut tokens, agency);
        }
        match facts.grade() {
            Some(grade) => push_unique(&mut tokens, grade),
            None => push_unique(&mut tokens, "certified"),
        }
    } else if facts.has_identity_details() {
        push_unique(&mut tokens, "raw");
    }

    let notes = facts.notes_lower();
    for keyword in ["error", "variety", "toned"] {
        if notes.contains(keyword) {
            push_unique(&mut tokens, keyword);
        }
    }
    // "proof" only when neither the grade nor the denomination already
    // says so (PR/PF grades are proof grades).
    if notes.contains("proof") {
        let grade_implies_proof = facts
            .grade()
            .map(|g| {
                let g = g.to_lowercase();
                g.contains("pr") || g.contains("pf")
            })
            .unwrap_or(false);
        let denom_implies_proof = facts
            .denomination()
            .map(|d| d.to_lowercase().contains("proof"))
            .unwrap_or(false);
        if !grade_implies_proof && !denom_implies_proof {
            push_unique(&mut tokens, "proof");
        }
    }

    if only_filler(&tokens, MARKETPLACE_FILLER) {
        return "coin".to_string();
    }
    tokens.join(" ")
}

/// Assemble the general web-search query.
///
/// Token order: year, country, denomination, mint mark, "coin",
/// informational keywords from the notes, grading info, then
/// error/variety keywords. When no note keyword added context but core
/// details exist, a trailing "information" is appended. Falls back to
/// `"coin information"` when nothing identifying was given.
pub fn build_web_search_query(facts: &CoinQueryFacts) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for part in [facts.year(), facts.country(), facts.denomination(), facts.mint_mark()]
        .into_iter()
        .flatten()
    {
        push_unique(&mut tokens, part);
    }
    push_unique(&mut tokens, "coin");

    let notes = facts.notes_lower();
    let mut specific_context = false;
    for keyword in ["value", "history", "mintage", "identification"] {
        if notes.contains(keyword) && !tokens.iter().any(|t| t.eq_ignore_ascii_case(keyword)) {
            tokens.push(keyword.to_string());
            specific_context = true;
        }
    }

    if facts.is_graded {
        if let Some(agency) = facts.grading_agency() {
            push_unique(&mut tokens, agency);
        }
        if let Some(grade) = facts.grade() {
            push_unique(&mut tokens, grade);
        }
    }

    for keyword in ["error", "variety"] {
        if notes.contains(keyword) {
            push_unique(&mut tokens, keyword);
        }
    }

    if !specific_context && facts.has_core_details() {
        push_unique(&mut tokens, "information");
    }

    if only_filler(&tokens, WEB_SEARCH_FILLER) && !specific_context {
        return "coin information".to_string();
    }
    tokens.join(" ")
}

/// Embed a query into the eBay search URL, percent-encoded.
pub fn marketplace_url(query: &str) -> String {
    Url::parse_with_params(MARKETPLACE_BASE, &[("_nkw", query)])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| MARKETPLACE_BASE.to_string())
}

/// Embed a query into the Google search URL, percent-encoded.
pub fn web_search_url(query: &str) -> String {
    Url::parse_with_params(WEB_SEARCH_BASE, &[("q", query)])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| WEB_SEARCH_BASE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(year: &str, country: &str) -> CoinQueryFacts {
        CoinQueryFacts {
            year: Some(year.to_string()),
            country: Some(country.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_facts_fall_back_to_coin() {
        assert_eq!(build_marketplace_query(&CoinQueryFacts::default()), "coin");
    }

    #[test]
    fn empty_facts_fall_back_to_coin_information() {
        assert_eq!(build_web_search_query(&CoinQueryFacts::default()), "coin information");
    }

    #[test]
    fn graded_coin_token_order() {
        let f = CoinQueryFacts {
            year: Some("1943".into()),
            country: Some("USA".into()),
            is_graded: true,
            grading_agency: Some("PCGS".into()),
            grade: Some("MS65".into()),
            ..Default::default()
        };
        assert_eq!(build_marketplace_query(&f), "1943 USA coin PCGS MS65");
    }

    #[test]
    fn ungraded_identified_coin_gets_raw() {
        assert_eq!(build_marketplace_query(&facts("1921", "USA")), "1921 USA coin raw");
    }

    #[test]
    fn graded_without_grade_gets_certified() {
        let f = CoinQueryFacts { is_graded: true, ..facts("1893", "USA") };
        assert_eq!(build_marketplace_query(&f), "1893 USA coin certified");
    }

    #[test]
    fn notes_keywords_are_added_once() {
        let f = CoinQueryFacts {
            notes: Some("Is this an error? It looks like a known error variety.".into()),
            ..facts("1955", "USA")
        };
        assert_eq!(build_marketplace_query(&f), "1955 USA coin raw error variety");
    }

    #[test]
    fn proof_suppressed_when_grade_implies_it() {
        let f = CoinQueryFacts {
            is_graded: true,
            grade: Some("PF69".into()),
            notes: Some("is this a proof strike?".into()),
            ..facts("1964", "USA")
        };
        let q = build_marketplace_query(&f);
        assert!(!q.contains("proof"), "got: {q}");
    }

    #[test]
    fn proof_added_for_ungraded_business_strike_question() {
        let f = CoinQueryFacts {
            notes: Some("could it be a proof?".into()),
            ..facts("1964", "USA")
        };
        assert_eq!(build_marketplace_query(&f), "1964 USA coin raw proof");
    }

    #[test]
    fn web_search_adds_information_without_note_context() {
        assert_eq!(build_web_search_query(&facts("1916", "USA")), "1916 USA coin information");
    }

    #[test]
    fn web_search_note_keyword_replaces_information() {
        let f = CoinQueryFacts {
            notes: Some("what is the mintage of this?".into()),
            ..facts("1916", "USA")
        };
        assert_eq!(build_web_search_query(&f), "1916 USA coin mintage");
    }

    #[test]
    fn note_context_alone_is_an_acceptable_query() {
        // "coin value" with no identifying details is allowed through,
        // not collapsed into the fallback.
        let f = CoinQueryFacts { notes: Some("value?".into()), ..Default::default() };
        assert_eq!(build_web_search_query(&f), "coin value");
    }

    #[test]
    fn whitespace_only_fields_are_ignored() {
        let f = CoinQueryFacts {
            year: Some("   ".into()),
            country: Some("\t".into()),
            ..Default::default()
        };
        assert_eq!(build_marketplace_query(&f), "coin");
    }

    #[test]
    fn urls_are_percent_encoded() {
        let url = marketplace_url("1943 USA coin");
        assert!(url.starts_with("https://www.ebay.com/sch/i.html?_nkw="));
        assert!(!url.contains(' '));
        let url = web_search_url("coin information");
        assert!(url.starts_with("https://www.google.com/search?q="));
        assert!(!url.contains(' '));
    }
}
