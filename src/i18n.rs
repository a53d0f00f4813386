//! Display-language string tables.
//!
//! Three languages, static data, lookup with fallback to English.
//! The one load-bearing string is `sales_disclaimer`: the model is
//! instructed to emit it verbatim (translated for non-English runs) and
//! the report segmenter matches it back out of the response.

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
}

/// Display strings for one language.
#[derive(Debug)]
pub struct Strings {
    /// Full language name as used in the prompt ("Spanish", not "es").
    pub language_name: &'static str,
    /// The canonical sales disclaimer the model is told to include.
    pub sales_disclaimer: &'static str,
    pub report_title: &'static str,
    pub report_details_title: &'static str,
    pub report_disclaimer_title: &'static str,
    pub report_sources_title: &'static str,
    pub option_grade_and_condition: &'static str,
    pub option_mintage_and_rarity: &'static str,
    pub option_recent_sales_data: &'static str,
    pub option_grade_comparison: &'static str,
    pub option_coin_fingerprinting: &'static str,
    pub option_other: &'static str,
}

const EN: Strings = Strings {
    language_name: "English",
    sales_disclaimer: "Note: Market prices are dynamic and this data is a snapshot, not a \
        guaranteed valuation. Prices can vary based on the specific auction, buyer demand, and \
        subtle differences in coin condition not apparent in all images.",
    report_title: "Analysis Report",
    report_details_title: "Analysis Details",
    report_disclaimer_title: "Important Disclaimer",
    report_sources_title: "Sources from Google Search",
    option_grade_and_condition: "Grade and Condition",
    option_mintage_and_rarity: "Mintage and Rarity",
    option_recent_sales_data: "Recent Sales Data",
    option_grade_comparison: "Grade Comparison",
    option_coin_fingerprinting: "Coin Fingerprinting (Descriptive)",
    option_other: "Other",
};

const ES: Strings = Strings {
    language_name: "Spanish",
    sales_disclaimer: "Nota: Los precios de mercado son dinámicos y estos datos son una \
        instantánea, no una valoración garantizada. Los precios pueden variar según la subasta \
        específica, la demanda del comprador y diferencias sutiles en la condición de la moneda \
        no aparentes en todas las imágenes.",
    report_title: "Informe de Análisis",
    report_details_title: "Detalles del Análisis",
    report_disclaimer_title: "Descargo de Responsabilidad Importante",
    report_sources_title: "Fuentes de Google Search",
    option_grade_and_condition: "Grado y Condición",
    option_mintage_and_rarity: "Acuñación y Rareza",
    option_recent_sales_data: "Datos de Ventas Recientes",
    option_grade_comparison: "Comparación de Grados",
    option_coin_fingerprinting: "Huella Digital de la Moneda (Descriptiva)",
    option_other: "Otro",
};

const FR: Strings = Strings {
    language_name: "French",
    sales_disclaimer: "Remarque : Les prix du marché sont dynamiques et ces données sont un \
        instantané, pas une évaluation garantie. Les prix peuvent varier en fonction de \
        l'enchère spécifique, de la demande de l'acheteur et de différences subtiles dans \
        l'état de la pièce non apparentes sur toutes les images.",
    report_title: "Rapport d'Analyse",
    report_details_title: "Détails de l'Analyse",
    report_disclaimer_title: "Avis Important",
    report_sources_title: "Sources de Google Search",
    option_grade_and_condition: "Grade et État",
    option_mintage_and_rarity: "Tirage et Rareté",
    option_recent_sales_data: "Données de Ventes Récentes",
    option_grade_comparison: "Comparaison de Grades",
    option_coin_fingerprinting: "Empreinte de la Pièce (Descriptive)",
    option_other: "Autre",
};

impl Language {
    /// Parse a language code, falling back to English for anything
    /// unrecognized.
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "es" => Language::Es,
            "fr" => Language::Fr,
            _ => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    /// The string table for this language.
    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Fr => &FR,
        }
    }
}
