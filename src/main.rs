//! Command-line shell: parse the coin details, run the analysis, print
//! the segmented report.

use clap::Parser;
use mintmark::i18n::Language;
use mintmark::llm::{analyze_coin, AnalysisOptions, AnalysisRequest, CoinDetails};
use mintmark::query::{
    build_marketplace_query, build_web_search_query, marketplace_url, web_search_url,
    CoinQueryFacts,
};
use mintmark::render::{render_text, AnalysisReport};
use mintmark::{config, images, report};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mintmark")]
#[command(about = "AI coin analysis from photos: grading, rarity, sales data")]
#[command(version)]
struct Args {
    /// Primary coin photo (obverse, or both sides in one shot)
    image: Option<PathBuf>,

    /// Separate reverse photo
    #[arg(long)]
    reverse: Option<PathBuf>,

    /// Year on the coin
    #[arg(long)]
    year: Option<String>,

    /// Denomination (e.g. "Cent", "Morgan Dollar")
    #[arg(long)]
    denomination: Option<String>,

    /// Country of origin
    #[arg(long)]
    country: Option<String>,

    /// Metal, if known
    #[arg(long)]
    metal: Option<String>,

    /// Mint mark, if visible
    #[arg(long)]
    mint_mark: Option<String>,

    /// The coin has been professionally graded
    #[arg(long)]
    graded: bool,

    /// Grading agency (e.g. PCGS, NGC)
    #[arg(long, requires = "graded")]
    agency: Option<String>,

    /// Assigned grade (e.g. MS65)
    #[arg(long, requires = "graded")]
    grade: Option<String>,

    /// A specific question to ask about the coin
    #[arg(long)]
    question: Option<String>,

    /// Skip the grade and condition assessment
    #[arg(long)]
    no_grade: bool,

    /// Skip mintage and rarity
    #[arg(long)]
    no_mintage: bool,

    /// Skip recent sales data (also disables web search grounding)
    #[arg(long)]
    no_sales: bool,

    /// Skip the grade comparison
    #[arg(long)]
    no_comparison: bool,

    /// Request a descriptive coin fingerprint
    #[arg(long)]
    fingerprint: bool,

    /// Report language: en, es or fr
    #[arg(long, default_value = "en")]
    lang: String,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Store a Gemini API key in the OS keychain and exit
    #[arg(long, value_name = "KEY")]
    save_key: Option<String>,
}

#[tokio::main]
async fn main() {
    config::load_dotenv();
    env_logger::init();

    let args = Args::parse();
    if let Err(message) = run(args).await {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), String> {
    if let Some(key) = &args.save_key {
        config::save_api_key(key)?;
        println!("API key saved.");
        return Ok(());
    }

    let Some(image) = &args.image else {
        return Err("an image path is required (or --save-key to store a key)".into());
    };

    config::ensure_api_key();

    let language = Language::from_code(&args.lang);
    let strings = language.strings();

    let primary_image = images::load_image_part(image).map_err(|e| e.to_string())?;
    let reverse_image = match &args.reverse {
        Some(path) => Some(images::load_image_part(path).map_err(|e| e.to_string())?),
        None => None,
    };

    let details = CoinDetails {
        year: args.year.clone().unwrap_or_default(),
        denomination: args.denomination.clone().unwrap_or_default(),
        country: args.country.clone().unwrap_or_default(),
        metal: args.metal.clone().unwrap_or_default(),
        mint_mark: args.mint_mark.clone().unwrap_or_default(),
        is_graded: args.graded,
        grading_agency: args.agency.clone().unwrap_or_default(),
        grade: args.grade.clone().unwrap_or_default(),
        other_questions: args.question.clone().unwrap_or_default(),
    };

    let options = AnalysisOptions {
        grade_and_condition: !args.no_grade,
        mintage_and_rarity: !args.no_mintage,
        recent_sales_data: !args.no_sales,
        grade_comparison: !args.no_comparison,
        coin_fingerprinting: args.fingerprint,
        other: args.question.as_deref().is_some_and(|q| !q.trim().is_empty()),
    };

    let request = AnalysisRequest {
        primary_image,
        reverse_image,
        details,
        options,
        language,
    };

    let response = analyze_coin(&request).await.map_err(|e| e.to_string())?;
    let sections = report::segment(&response.text, strings.sales_disclaimer);

    let facts = CoinQueryFacts {
        year: args.year,
        country: args.country,
        denomination: args.denomination,
        mint_mark: args.mint_mark,
        grading_agency: args.agency,
        grade: args.grade,
        is_graded: args.graded,
        notes: args.question,
    };
    let marketplace = marketplace_url(&build_marketplace_query(&facts));
    let web_search = web_search_url(&build_web_search_query(&facts));

    let analysis = AnalysisReport {
        sections,
        grounding_sources: response.grounding_sources,
        marketplace_url: marketplace,
        web_search_url: web_search,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let json = serde_json::to_string_pretty(&analysis).map_err(|e| e.to_string())?;
        use std::io::Write;
        writeln!(out, "{json}").map_err(|e| e.to_string())?;
    } else {
        render_text(&mut out, &analysis, strings).map_err(|e| e.to_string())?;
    }
    Ok(())
}
