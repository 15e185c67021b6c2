use anyhow::Context;
use serde::Deserialize;

const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";
const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LLM_MODEL: &str = "tngtech/deepseek-r1t2-chimera:free";
const PLACEHOLDER_API_KEY: &str = "your_key_here";

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub base_url: String,
    pub restaurant_info_id: Option<String>,
    pub timings_id: Option<String>,
    pub menu_id: Option<String>,
    pub extras_id: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// The key only counts when it is set to something other than the sample value.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sheets: SheetsConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let sheets = SheetsConfig {
            base_url: std::env::var("SHEETS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_BASE_URL.into()),
            restaurant_info_id: optional_var("SHEET_ID_RESTAURANT_INFO"),
            timings_id: optional_var("SHEET_ID_TIMINGS"),
            menu_id: optional_var("SHEET_ID_MENU"),
            extras_id: optional_var("SHEET_ID_EXTRAS"),
            timeout_secs: parsed_var("SHEETS_TIMEOUT_SECS", 15)?,
        };
        let llm = LlmConfig {
            api_key: optional_var("OPENROUTER_API_KEY"),
            base_url: std::env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.into()),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.into()),
            temperature: parsed_var("LLM_TEMPERATURE", 0.7)?,
            max_tokens: parsed_var("LLM_MAX_TOKENS", 512)?,
            timeout_secs: parsed_var("LLM_TIMEOUT_SECS", 60)?,
        };
        Ok(Self { sheets, llm })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
