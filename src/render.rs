//! Terminal output for a finished analysis.

use crate::i18n::Strings;
use crate::llm::GroundingSource;
use crate::report::titles::canonicalize_title;
use crate::report::AnalysisSection;
use serde::Serialize;
use std::io::{self, Write};

/// Everything the run produced, in one serializable bundle for `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub sections: Vec<AnalysisSection>,
    pub grounding_sources: Vec<GroundingSource>,
    pub marketplace_url: String,
    pub web_search_url: String,
}

/// Write the report as readable text. Section titles are canonicalized
/// to the active language; the disclaimer section is set apart from the
/// analysis body.
pub fn render_text(
    out: &mut impl Write,
    report: &AnalysisReport,
    strings: &Strings,
) -> io::Result<()> {
    writeln!(out, "{}", strings.report_title)?;
    writeln!(out, "{}", "=".repeat(strings.report_title.chars().count()))?;

    for section in &report.sections {
        let title = canonicalize_title(&section.title, strings);
        writeln!(out)?;
        if section.is_disclaimer {
            writeln!(out, "--- {} ---", strings.report_disclaimer_title)?;
        } else {
            writeln!(out, "## {}", title)?;
        }
        writeln!(out, "{}", section.content.trim_end())?;
    }

    if !report.grounding_sources.is_empty() {
        writeln!(out)?;
        writeln!(out, "## {}", strings.report_sources_title)?;
        for source in &report.grounding_sources {
            if source.title.is_empty() {
                writeln!(out, "- {}", source.uri)?;
            } else {
                writeln!(out, "- {} <{}>", source.title, source.uri)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "## {}", strings.report_details_title)?;
    writeln!(out, "- eBay:   {}", report.marketplace_url)?;
    writeln!(out, "- Google: {}", report.web_search_url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn report() -> AnalysisReport {
        AnalysisReport {
            sections: vec![
                AnalysisSection {
                    title: "Grade and Condition".into(),
                    content: "MS-65 with strong luster.".into(),
                    is_disclaimer: false,
                },
                AnalysisSection {
                    title: "Important Disclaimer".into(),
                    content: "Sales data may not reflect current values.".into(),
                    is_disclaimer: true,
                },
            ],
            grounding_sources: vec![GroundingSource {
                uri: "https://example.com/sale".into(),
                title: "Example Sale".into(),
            }],
            marketplace_url: "https://www.ebay.com/sch/i.html?_nkw=1943+cent".into(),
            web_search_url: "https://www.google.com/search?q=1943+cent".into(),
        }
    }

    #[test]
    fn sections_sources_and_links_all_appear() {
        let mut buf = Vec::new();
        render_text(&mut buf, &report(), Language::En.strings()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("## Grade and Condition"));
        assert!(text.contains("MS-65 with strong luster."));
        assert!(text.contains("Example Sale <https://example.com/sale>"));
        assert!(text.contains("https://www.ebay.com/sch/i.html?_nkw=1943+cent"));
    }

    #[test]
    fn disclaimer_is_visually_set_apart() {
        let mut buf = Vec::new();
        render_text(&mut buf, &report(), Language::En.strings()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("--- Important Disclaimer ---"));
        assert!(!text.contains("## Important Disclaimer"));
    }

    #[test]
    fn titles_are_canonicalized_to_the_active_language() {
        let mut buf = Vec::new();
        render_text(&mut buf, &report(), Language::Es.strings()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(Language::Es.strings().option_grade_and_condition));
    }
}
