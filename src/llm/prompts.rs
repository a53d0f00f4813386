//! Numismatic analysis prompt construction.
//!
//! The prompt is the contract with the model: Part 1 describes the coin
//! (images + known details), Part 2 requests one fragment per enabled
//! analysis option, and a closing block pins the response structure and
//! the output language. Each option toggle maps to exactly one fragment
//! function so the pieces stay independently testable.

use super::types::{AnalysisOptions, CoinDetails};
use crate::i18n::Language;

/// The grading handbook embedded in the Grade and Condition fragment.
/// The model is told to ground every grade it assigns in this text.
const GRADING_GUIDE: &str = r#"  Your assessment should be based on a holistic evaluation of the "Four Pillars of Grading": Strike, Luster, Surface Preservation, and Eye Appeal.

  The Four Pillars of Grading Defined:
  1.  Strike: The quality and sharpness of the impression transferred from the coining dies to the planchet. A strong or "full" strike exhibits crisp, well-defined details. A weak strike results in details that appear soft, fuzzy, or incomplete. Differentiate a weak strike from circulation wear.
  2.  Luster: The reflective quality of a coin's surface as originally minted, created by microscopic flow lines. It creates a "cartwheel" effect when tilted under light. Luster is fragile and paramount in determining grades in AU and MS/PF ranges.
  3.  Surface Preservation: Assessment of imperfections on the coin's surface. These include:
      *   Contact Marks (Bag Marks): Nicks and scratches from contact with other coins.
      *   Hairlines: Fine, shallow scratches, often from improper cleaning.
      *   Other Damage: Rim dings, spots, corrosion, etc.
      The number, size, severity, and location of these marks are critical.
  4.  Eye Appeal: The overall aesthetic quality and visual attractiveness. It's a synthesis of the other three pillars, plus factors like toning. Exceptional eye appeal may be noted by TPGs with designations like NGC Star or PCGS Plus (+).

  Consider the following detailed Sheldon Scale / Proof Grading Scale descriptions:

  The Sheldon Scale for Circulated and Mint State Coins (PO-1 to MS-70):
    | Grade   | Adjectival             | Description                                                                 |
    |---------|------------------------|-----------------------------------------------------------------------------|
    | PO-1    | Poor                   | Clear enough to identify date, mintmark, and type. May be very badly worn or corroded. |
    | FR-2    | Fair                   | Entire coin is worn flat. Some detail shows, but only traces of peripheral lettering are visible. |
    | AG-3    | About Good             | Very heavily worn. Rims are worn into the tops of the lettering, but most lettering is still readable. |
    | G-4     | Good                   | Heavily worn. Rims are mostly full but may be worn into the lettering in spots. Design is visible but faint. Principal design elements outlines, coin largely flat with little interior detail. |
    | G-6     | Choice Good            | Rims and peripheral lettering are full. Design is flat and visible only in outline form. Slightly more distinct than G-4. |
    | VG-8    | Very Good              | Most central detail is worn flat. Rims remain full. Two to three letters of LIBERTY may show (if applicable to design). Considerable wear, but more design details apparent. |
    | VG-10   | Very Good              | Considerable wear has flattened most fine details. Most lettering is readable. Five or six letters of LIBERTY may show (if applicable). |
    | F-12    | Fine                   | Moderate but even wear. About half of the design detail is worn flat, but all lettering is visible. Major design elements clearly defined. |
    | F-15    | Fine                   | Slightly less than half of the finer detail is worn flat. All lettering remains sharp and clear. Sharper details than F-12. |
    | VF-20   | Very Fine              | Moderate wear is evident, with some loss of finer detail. All lettering is full and sharp. Major features and lettering sharp. |
    | VF-25   | Very Fine              | Entire surface shows wear, but major design features remain clear and distinct. Less wear, some finer details sharper than VF-20. |
    | VF-30   | Very Fine              | Wear is evident over the entire surface. Intricate design details are beginning to flatten. Most details sharp, light wear on highest points. |
    | VF-35   | Choice Very Fine       | Light, even wear over the entire surface, though all major details are still visible and sharp. Traces of luster may be present. |
    | XF-40   | Extremely Fine         | Overall sharpness with light wear on the highest points. Details are sharp, but high points are worn flat. Some luster visible. |
    | XF-45   | Extremely Fine         | Light wear on the high points of the design is evident. Some luster may be visible in protected areas. Minimal wear, stronger luster. |
    | AU-50   | About Uncirculated     | A trace of wear is visible on the highest points of the design. Bits of luster may remain in protected areas. Noticeable friction. |
    | AU-53   | About Uncirculated     | Slight flatness and loss of luster on the high points of the design. Some luster remains. Less friction than AU-50. |
    | AU-55   | About Uncirculated     | Full detail with light friction on the high points. Considerable mint luster remains. Good luster and eye appeal. |
    | AU-58   | Choice About Uncirculated | Only the slightest friction on the highest points of the design. Virtually full mint luster remains. Minimal friction, looks nearly MS. |
    | MS/PF-60| Uncirculated / Proof   | No wear from circulation. May be poorly struck with many heavy marks, scratches, or impaired luster. (For Proofs: numerous distracting marks/hairlines, possibly impaired fields). |
    | MS/PF-61| Uncirculated / Proof   | No wear, but may have a weak strike and multiple heavy marks or distracting hairlines. Slightly fewer negative factors than 60. |
    | MS/PF-62| Uncirculated / Proof   | No wear, but strike may be average or weak. Numerous marks or hairlines are present. Marks still noticeable, luster might be impaired. |
    | MS/PF-63| Choice Uncirculated / Proof | Average or slightly weak strike with a moderate number of contact marks or hairlines. Acceptable strike & luster. Benchmark "average" MS. |
    | MS/PF-64| Choice Uncirculated / Proof | Average or better strike with scattered marks, though none are severe. Pleasing eye appeal. Better-than-average strike & good luster. |
    | MS/PF-65| Gem Uncirculated / Proof | Above-average strike with minor marks that are mostly outside of focal areas. Strong eye appeal. Strong strike, attractive luster. |
    | MS/PF-66| Gem Uncirculated / Proof | Well-struck with a few minor marks or hairlines, none of which are in primary focal areas. Very few light marks, full vibrant luster. |
    | MS/PF-67| Superb Gem Uncirculated / Proof | A sharply struck coin with only minor imperfections visible without magnification. Exceptional luster, strike, eye appeal. |
    | MS/PF-68| Superb Gem Uncirculated / Proof | Very sharp strike with a few tiny, barely visible imperfections. Nearly flawless, requires magnification to see tiny imperfections. |
    | MS/PF-69| Superb Gem Uncirculated / Proof | A fully struck coin with minuscule, nearly imperceptible imperfections not in focal areas. Nearly perfect, microscopic imperfections. |
    | MS/PF-70| Perfect Uncirculated / Proof | A flawless coin with no post-production imperfections visible under 5x magnification. Fully struck with original, vibrant luster. |

  Problem Coin Assessment:
  Carefully examine for signs of "problem coins," which cannot be assigned a standard numerical grade. These include:
    - Harshly Cleaned: Fine, parallel hairlines or scratches. May have bright but unnatural appearance. Detect by rotating under light.
    - Dipped (Improper Chemical Cleaning): Luster stripped, leaving dull, lifeless, or "flat" surface. May appear unnaturally white/bright. Copper may show pale pink/orange hue.
    - Whizzed: Unnaturally brilliant, "greasy" luster. Metal may appear pushed up around devices. Fine, swirling brush marks under magnification.
    - Rubbed/Thumbed: Hazy, filmy, or cloudy areas, often over marks or high points to conceal scratches. Luster appears deadened/muted.
    - Filed Rims: Unnatural smoothness or tool marks on edge. Unusual profile.
    - Environmental Damage: Pitting, roughness, significant corrosion (green on copper, dark/rough on silver). Granular/porous surface.
    - Artificial Toning: Unnatural, "crayon-like" colors. Colors may "float" or appear in unusual patterns or over scratches.
    - Scratched: Deep, random lines or gouges that are clearly post-mint damage.
  If such problems are detected, explain them and state that the coin would likely receive a "Details" grade (e.g., "VF Details - Cleaned"). Differentiate between mint-made imperfections (e.g., die polish lines, weak strike) and post-mint damage.
"#;

/// Does anything the user told us suggest a proof strike? Steers the
/// grading fragment toward the PF scale.
pub(crate) fn is_likely_proof(details: &CoinDetails) -> bool {
    let grade = details.grade.to_uppercase();
    grade.starts_with("PF")
        || grade.starts_with("PR")
        || details.denomination.to_lowercase().contains("proof")
        || details.other_questions.to_lowercase().contains("proof")
}

fn or_not_provided(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Not provided"
    } else {
        trimmed
    }
}

/// Part 1 — image inventory and known details.
fn about_your_coin(details: &CoinDetails, has_reverse: bool) -> String {
    let reverse_line = if has_reverse {
        "Separate Reverse Image: [Image provided]"
    } else {
        "Separate Reverse Image: [Not provided]"
    };

    let mut part = format!(
        "Part 1: About Your Coin\n\
         Image(s) Provided:\n\
         Primary Image: [Image provided - This may show the obverse, or both obverse and reverse if captured in a single photo]\n\
         {reverse_line}\n\
         \n\
         Known Details:\n\
         Year: {}\n\
         Denomination: {}\n\
         Country of Origin: {}\n\
         Metal (if known): {}\n\
         Mint Mark (if visible): {}",
        or_not_provided(&details.year),
        or_not_provided(&details.denomination),
        or_not_provided(&details.country),
        or_not_provided(&details.metal),
        or_not_provided(&details.mint_mark),
    );

    if details.is_graded {
        part.push_str(&format!(
            "\nThis coin has been professionally graded:\n\
             \x20 Grading Agency: {}\n\
             \x20 Assigned Grade: {}",
            or_not_provided(&details.grading_agency),
            or_not_provided(&details.grade),
        ));
    }
    part
}

/// Grade and Condition fragment: the grading guide plus either a
/// concur-with-grade request (pre-graded coin) or an assign-a-grade
/// request (raw coin).
fn grade_and_condition(details: &CoinDetails) -> String {
    let likely_proof = is_likely_proof(details);
    let mut fragment = format!("\n- Grade and Condition:\n{GRADING_GUIDE}");

    let has_reported_grade =
        details.is_graded && !details.grading_agency.trim().is_empty() && !details.grade.trim().is_empty();

    if has_reported_grade {
        fragment.push_str(&format!(
            "\n  This coin is reported as professionally graded (Agency: {}, Grade: {}).\n\
             \x20 Based on the images and the grading criteria above:\n\
             \x20 1. Provide your independent assessment of each of the Four Pillars (Strike, Luster, Surface Preservation, Eye Appeal) as visible in the image.\n\
             \x20 2. Do you concur with the provided grade of {}?\n\
             \x20 3. Explain your reasoning in detail, referencing specific features visible in the images and correlating them to the Sheldon Scale descriptions provided.\n\
             \x20 4. If your assessment differs, explain the discrepancies. Identify any \"problem coin\" characteristics if they seem to have been overlooked or contradict the given grade.\n",
            details.grading_agency.trim(),
            details.grade.trim(),
            details.grade.trim(),
        ));
    } else {
        let scale = if likely_proof {
            "Proof (PF-60 to PF-70)"
        } else {
            "Sheldon (PO-1 to MS-70)"
        };
        let luster_note = if likely_proof {
            "For Proofs, comment on the reflectivity of mirrored fields."
        } else {
            "For Mint State coins, describe the vibrancy and completeness of luster. Slight impairments or breaks in luster can differentiate grades."
        };
        fragment.push_str(&format!(
            "\n  Assign a numismatic grade to this coin using the {scale} scale.\n\
             \x20 Provide a specific numerical grade (e.g., G-4, VF-20, MS-65, PF-68).\n\
             \x20 Explain your reasoning in detail:\n\
             \x20 1.  Discuss each of the Four Pillars:\n\
             \x20     *   Strike: Evaluate the sharpness and completeness of details.\n\
             \x20     *   Luster: Describe its presence, quality, and any \"cartwheel\" effect. {luster_note}\n\
             \x20     *   Surface Preservation: Detail all observed marks, hairlines, or damage. For Mint State coins pay extremely close attention to the number, size, severity, and location of contact marks and hairlines, as these are primary differentiators between grades like MS-63, MS-64, and MS-65. Note whether marks are in focal areas.\n\
             \x20     *   Eye Appeal: Summarize the overall visual attractiveness, including toning.\n\
             \x20 2.  Correlate your observations for each pillar directly to the chosen grade from the detailed scale above. If significant wear is observed, pay close attention to the criteria for grades PO-1 through F-15: assess whether design elements are primarily outlines with little interior detail, the condition of the rims relative to the lettering, and whether details are merely faint or intricate details are beginning to flatten.\n\
             \x20 3.  Explicitly state if you detect any \"problem coin\" characteristics. If so, explain why it would receive a \"Details\" grade.\n\
             \x20 4.  Justify your grade: explain why the coin does not qualify for the next higher grade and why it is better than the next lower grade, based on the specific criteria in the table.\n",
        ));
        if likely_proof {
            fragment.push_str(
                "  Since this might be a Proof coin, pay special attention to the mirror-like fields, sharpness of devices, and any hairlines or marks affecting the fields. Note if it exhibits Cameo (CAM) or Deep/Ultra Cameo (DCAM/UC) characteristics.\n",
            );
        }
    }
    fragment
}

fn mintage_and_rarity() -> &'static str {
    "\n- Mintage and Rarity:\n\
     \x20 Provide the original mintage figures for this specific coin (considering year, denomination, country, and mint mark if available).\n\
     \x20 Discuss its relative rarity in the current numismatic market. Consider factors like survival rates and collector demand.\n"
}

/// The sales fragment embeds the canonical English disclaimer verbatim;
/// the segmenter matches it (or its translation) back out of the
/// response.
fn recent_sales_data() -> String {
    format!(
        "\n- Recent Sales Data:\n\
         \x20 Provide 2-3 examples of recent (within the last 1-2 years, if possible) auction or sale prices for coins of the exact same type (year, denomination, mint mark) AND in a grade similar to the one you assigned (or the provided grade if assessing that) above.\n\
         \x20 For each example, specify the source (e.g., auction house, sales platform name), the sale date, and the price realized.\n\
         \x20 Include a disclaimer: \"{}\"\n",
        Language::En.strings().sales_disclaimer
    )
}

fn grade_comparison() -> &'static str {
    "\n- Grade Comparison:\n\
     \x20 If a grade was assigned or assessed above:\n\
     \x20   1. Describe the typical characteristics (strike, luster, surface preservation, eye appeal based on the guide's criteria) of a coin of the SAME TYPE that is ONE GRADE HIGHER on the scale. What specific improvements would be expected?\n\
     \x20   2. Describe the typical characteristics of a coin of the SAME TYPE that is ONE GRADE LOWER on the scale. What specific additional wear or detractions would be present?\n\
     \x20 Focus on tangible differences as outlined in the provided grading scale. If grading was not possible or assessed, explain generally how coin grades differ.\n"
}

fn coin_fingerprint() -> &'static str {
    "\n- Coin Fingerprint (Descriptive):\n\
     \x20 Carefully examine the provided images for unique, permanent, and objectively identifiable micro-features that could help distinguish this specific coin from others of the same type and general condition.\n\
     \x20 List these features with as much precision as possible regarding their nature, size, shape, and location (e.g., \"Small V-shaped scratch above the 'T' in LIBERTY,\" \"Die crack running from the rim at 2 o'clock through the third hair curl\").\n\
     \x20 Focus on features that are unlikely to change with normal handling and are not common to all coins of this type (e.g., avoid common die markers unless exceptionally prominent).\n\
     \x20 The goal is to create a detailed textual description that acts as a unique identifier for this coin based on its visual characteristics.\n\
     \x20 Disclaimer: This descriptive fingerprint is based on visual analysis. Its uniqueness and reproducibility depend on the clarity and detail of the provided images and the distinctiveness of the coin's features.\n"
}

fn other_questions(details: &CoinDetails) -> String {
    format!(
        "\n- Other Specific Questions:\n\
         \x20 Please answer the following question(s): \"{}\"\n",
        details.other_questions.trim()
    )
}

/// Assemble the full analysis prompt.
pub fn build_analysis_prompt(
    details: &CoinDetails,
    options: &AnalysisOptions,
    language: Language,
    has_reverse: bool,
) -> String {
    let mut prompt = String::from(
        "You are an expert numismatist. Please analyze the coin based on the provided image(s) and details.\n\
         If only the primary image is provided, it may contain the obverse, or both obverse and reverse.\n\
         If a separate reverse image is also provided, consider both for a comprehensive analysis.\n\
         Refer to the comprehensive numismatic grading principles outlined below when assessing grade and condition.\n\n",
    );

    prompt.push_str(&about_your_coin(details, has_reverse));
    prompt.push_str(
        "\n\nPart 2: Requested Analysis\n\
         Please provide detailed information for the following selected services:\n",
    );

    if options.grade_and_condition {
        prompt.push_str(&grade_and_condition(details));
    }
    if options.mintage_and_rarity {
        prompt.push_str(mintage_and_rarity());
    }
    if options.recent_sales_data {
        prompt.push_str(&recent_sales_data());
    }
    if options.grade_comparison {
        prompt.push_str(grade_comparison());
    }
    if options.coin_fingerprinting {
        prompt.push_str(coin_fingerprint());
    }
    if options.other && !details.other_questions.trim().is_empty() {
        prompt.push_str(&other_questions(details));
    }

    prompt.push_str(
        "\nPlease structure your response clearly, addressing each requested analysis section by section.\n\
         If images are not clear enough for a certain aspect, please state that clearly for that aspect.\n\
         For recent sales data, use available tools if necessary to find current information.\n\
         Adhere strictly to the numismatic principles and grading descriptions provided in this prompt.\n",
    );

    if language != Language::En {
        let name = language.strings().language_name;
        prompt.push_str(&format!(
            "\nIMPORTANT FINAL INSTRUCTION: Please provide your entire analysis response in {name}. \
             All parts of your answer, including all text, explanations, and any disclaimers like the \
             sales data note, should be in {name}.\n",
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CoinDetails {
        CoinDetails {
            year: "1943".into(),
            denomination: "Cent".into(),
            country: "USA".into(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_fields_render_as_not_provided() {
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::En, false);
        assert!(prompt.contains("Metal (if known): Not provided"));
        assert!(prompt.contains("Mint Mark (if visible): Not provided"));
        assert!(prompt.contains("Year: 1943"));
    }

    #[test]
    fn default_options_request_four_sections() {
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::En, false);
        assert!(prompt.contains("- Grade and Condition:"));
        assert!(prompt.contains("- Mintage and Rarity:"));
        assert!(prompt.contains("- Recent Sales Data:"));
        assert!(prompt.contains("- Grade Comparison:"));
        assert!(!prompt.contains("- Coin Fingerprint (Descriptive):"));
        assert!(!prompt.contains("- Other Specific Questions:"));
    }

    #[test]
    fn disabled_sales_omits_fragment_and_disclaimer() {
        let options = AnalysisOptions { recent_sales_data: false, ..Default::default() };
        let prompt = build_analysis_prompt(&details(), &options, Language::En, false);
        assert!(!prompt.contains("- Recent Sales Data:"));
        assert!(!prompt.contains(Language::En.strings().sales_disclaimer));
    }

    #[test]
    fn sales_fragment_carries_the_exact_disclaimer() {
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::En, false);
        assert!(prompt.contains(Language::En.strings().sales_disclaimer));
    }

    #[test]
    fn graded_coin_asks_for_concurrence() {
        let d = CoinDetails {
            is_graded: true,
            grading_agency: "PCGS".into(),
            grade: "MS65".into(),
            ..details()
        };
        let prompt = build_analysis_prompt(&d, &AnalysisOptions::default(), Language::En, false);
        assert!(prompt.contains("Do you concur with the provided grade of MS65?"));
        assert!(prompt.contains("Grading Agency: PCGS"));
        assert!(!prompt.contains("Assign a numismatic grade"));
    }

    #[test]
    fn raw_coin_asks_for_a_grade_on_the_sheldon_scale() {
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::En, false);
        assert!(prompt.contains("Assign a numismatic grade to this coin using the Sheldon (PO-1 to MS-70) scale."));
    }

    #[test]
    fn proof_hints_switch_to_the_proof_scale() {
        let d = CoinDetails { denomination: "Proof Cent".into(), ..details() };
        let prompt = build_analysis_prompt(&d, &AnalysisOptions::default(), Language::En, false);
        assert!(prompt.contains("Proof (PF-60 to PF-70)"));
        assert!(prompt.contains("Cameo (CAM)"));
    }

    #[test]
    fn proof_detection_covers_grade_and_questions() {
        assert!(is_likely_proof(&CoinDetails { grade: "pf69".into(), ..Default::default() }));
        assert!(is_likely_proof(&CoinDetails { grade: "PR65".into(), ..Default::default() }));
        assert!(is_likely_proof(&CoinDetails {
            other_questions: "is this a proof?".into(),
            ..Default::default()
        }));
        assert!(!is_likely_proof(&CoinDetails { grade: "MS65".into(), ..Default::default() }));
    }

    #[test]
    fn non_english_adds_translate_instruction() {
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::Es, false);
        assert!(prompt.contains("entire analysis response in Spanish"));
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::En, false);
        assert!(!prompt.contains("IMPORTANT FINAL INSTRUCTION"));
    }

    #[test]
    fn reverse_image_is_inventoried() {
        let prompt = build_analysis_prompt(&details(), &AnalysisOptions::default(), Language::En, true);
        assert!(prompt.contains("Separate Reverse Image: [Image provided]"));
    }

    #[test]
    fn other_questions_only_with_text() {
        let options = AnalysisOptions { other: true, ..Default::default() };
        let prompt = build_analysis_prompt(&details(), &options, Language::En, false);
        assert!(!prompt.contains("- Other Specific Questions:"));

        let d = CoinDetails { other_questions: "What is the design history?".into(), ..details() };
        let prompt = build_analysis_prompt(&d, &options, Language::En, false);
        assert!(prompt.contains("Please answer the following question(s): \"What is the design history?\""));
    }
}
