//! Coin-photo analysis: Gemini vision call, report segmentation, and
//! outbound search-query assembly.
//!
//! Module map:
//! - `images`: photo loading and base64 payload prep
//! - `llm`: prompt assembly and the Gemini transport
//! - `report`: splitting the model's free text into titled sections
//! - `query`: eBay / Google query builders
//! - `i18n`: display-language string tables
//! - `config`: API key resolution (env, dotenv, OS keychain)
//! - `render`: terminal output

pub mod config;
pub mod i18n;
pub mod images;
pub mod llm;
pub mod query;
pub mod render;
pub mod report;
