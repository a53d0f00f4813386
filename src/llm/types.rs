//! Analysis request/response types.
//!
//! A request is built fresh per submission from the user's images, form
//! details, option toggles and display language; the response carries
//! the model's text plus any web-search grounding sources. Nothing here
//! is shared or mutated after construction.

use crate::i18n::Language;
use crate::images::ImagePart;
use serde::{Deserialize, Serialize};

/// User-supplied coin facts. All free text, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDetails {
    pub year: String,
    pub denomination: String,
    pub country: String,
    pub metal: String,
    pub mint_mark: String,
    pub is_graded: bool,
    pub grading_agency: String,
    pub grade: String,
    pub other_questions: String,
}

/// Which analysis sections to request. Each toggle maps to one prompt
/// fragment in prompts.rs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    pub grade_and_condition: bool,
    pub mintage_and_rarity: bool,
    pub recent_sales_data: bool,
    pub grade_comparison: bool,
    pub coin_fingerprinting: bool,
    pub other: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            grade_and_condition: true,
            mintage_and_rarity: true,
            recent_sales_data: true,
            grade_comparison: true,
            coin_fingerprinting: false,
            other: false,
        }
    }
}

/// One complete analysis submission.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Primary photo — may show the obverse, or both sides in one shot.
    pub primary_image: ImagePart,
    /// Optional separate reverse photo.
    pub reverse_image: Option<ImagePart>,
    pub details: CoinDetails,
    pub options: AnalysisOptions,
    pub language: Language,
}

/// A web citation returned when search grounding was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// What the transport hands back to the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub text: String,
    pub grounding_sources: Vec<GroundingSource>,
}
