//! Section-title canonicalization for display.
//!
//! The model usually keeps the English section titles from the prompt
//! even when the body is translated. This maps those known English
//! titles onto the active-language display strings; anything
//! unrecognized passes through unchanged. Pure lookup, never fails.

use crate::i18n::Strings;

/// Map a raw section title onto its display-language form.
pub fn canonicalize_title(raw: &str, strings: &Strings) -> String {
    match raw.to_lowercase().as_str() {
        "analysis overview" => strings.report_details_title.to_string(),
        "important disclaimer" => strings.report_disclaimer_title.to_string(),
        "grade and condition" => strings.option_grade_and_condition.to_string(),
        "mintage and rarity" => strings.option_mintage_and_rarity.to_string(),
        "recent sales data" => strings.option_recent_sales_data.to_string(),
        "grade comparison" => strings.option_grade_comparison.to_string(),
        "coin fingerprint (descriptive)" => strings.option_coin_fingerprinting.to_string(),
        "other specific questions" => strings.option_other.to_string(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn known_titles_map_to_display_strings() {
        let es = Language::Es.strings();
        assert_eq!(canonicalize_title("Grade and Condition", es), "Grado y Condición");
        assert_eq!(
            canonicalize_title("IMPORTANT DISCLAIMER", es),
            "Descargo de Responsabilidad Importante"
        );
    }

    #[test]
    fn english_is_identity_for_most_titles() {
        let en = Language::En.strings();
        assert_eq!(canonicalize_title("Recent Sales Data", en), "Recent Sales Data");
    }

    #[test]
    fn unrecognized_title_passes_through() {
        let fr = Language::Fr.strings();
        assert_eq!(canonicalize_title("Observations sur l'avers", fr), "Observations sur l'avers");
    }
}
