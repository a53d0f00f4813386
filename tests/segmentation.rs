//! End-to-end segmentation over realistic model responses.
//!
//! These exercise the full segment pipeline the way the shell uses it:
//! a multi-section response, the language-appropriate disclaimer, and
//! display-title canonicalization.

use mintmark::i18n::Language;
use mintmark::report::{segment, titles::canonicalize_title, DEFAULT_SECTION_TITLE};

const EN_RESPONSE: &str = "\
Here is the analysis of your coin.

Grade and Condition

The coin shows light, even wear over the entire surface. Strike is above average \
for the series. I assign a grade of XF-45.

Luster remains in protected areas around the devices.

Mintage and Rarity

684,628 pieces were struck at the Carson City mint, making this a better date.

Recent Sales Data

1. Heritage Auctions, March 2025: $312 in XF-45.
2. eBay, June 2025: $289 in XF-40.

Note: Market prices are dynamic and this data is a snapshot, not a guaranteed \
valuation. Prices can vary based on the specific auction, buyer demand, and subtle \
differences in coin condition not apparent in all images.

Grade Comparison

An AU-50 example would retain traces of luster across the fields. A VF-35 example \
would show flattening across the high points.";

fn en_disclaimer() -> &'static str {
    Language::En.strings().sales_disclaimer
}

#[test]
fn full_english_response_segments_into_titled_sections() {
    let sections = segment(EN_RESPONSE, en_disclaimer());

    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            DEFAULT_SECTION_TITLE,
            "Grade and Condition",
            "Mintage and Rarity",
            "Recent Sales Data",
            "Grade Comparison",
            "Important Disclaimer",
        ]
    );

    // The preamble lands in the default section.
    assert!(sections[0].content.contains("Here is the analysis"));
    // Multi-paragraph content stays in one section.
    assert!(sections[1].content.contains("XF-45"));
    assert!(sections[1].content.contains("Luster remains"));
    // The embedded disclaimer was lifted out of the sales section.
    assert!(!sections[3].content.contains("Market prices are dynamic"));
    assert!(sections[3].content.contains("Heritage Auctions"));
}

#[test]
fn exactly_one_disclaimer_and_it_is_last() {
    let sections = segment(EN_RESPONSE, en_disclaimer());
    let disclaimers: Vec<_> = sections.iter().filter(|s| s.is_disclaimer).collect();
    assert_eq!(disclaimers.len(), 1);
    assert!(sections.last().unwrap().is_disclaimer);
}

#[test]
fn spanish_response_uses_the_spanish_disclaimer() {
    let es = Language::Es.strings();
    let raw = format!(
        "Grado y Condición\n\nLa moneda muestra un desgaste ligero. Grado: XF-45.\n\n\
         Datos de Ventas Recientes\n\nHeritage, marzo 2025: $312.\n\n{}",
        es.sales_disclaimer
    );
    let sections = segment(&raw, es.sales_disclaimer);

    let disclaimers: Vec<_> = sections.iter().filter(|s| s.is_disclaimer).collect();
    assert_eq!(disclaimers.len(), 1);
    assert_eq!(disclaimers[0].content, es.sales_disclaimer);
}

#[test]
fn sales_section_without_a_disclaimer_gets_a_synthetic_one() {
    let raw = "Recent Sales Data\n\nHeritage Auctions, March 2025: $312 in XF-45.";
    let sections = segment(raw, en_disclaimer());
    let last = sections.last().unwrap();
    assert!(last.is_disclaimer);
    assert_eq!(last.content, en_disclaimer());
}

#[test]
fn canonicalized_titles_render_in_the_report_language() {
    let sections = segment(EN_RESPONSE, en_disclaimer());
    let fr = Language::Fr.strings();
    let display: Vec<String> = sections
        .iter()
        .map(|s| canonicalize_title(&s.title, fr))
        .collect();
    assert!(display.contains(&"Grade et État".to_string()));
    assert!(display.contains(&"Données de Ventes Récentes".to_string()));
}
