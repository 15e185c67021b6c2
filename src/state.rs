use crate::assistant::Assistant;
use crate::config::AppConfig;
use crate::llm::{CompletionService, OpenRouterClient};
use crate::restaurant::Clock;
use crate::sheets::{DataSource, GoogleSheetsClient};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let source = Arc::new(GoogleSheetsClient::new(&config.sheets)?) as Arc<dyn DataSource>;

        let completion = match OpenRouterClient::from_config(&config.llm)? {
            Some(client) => {
                info!(model = %config.llm.model, "completion service configured");
                Some(Arc::new(client) as Arc<dyn CompletionService>)
            }
            None => {
                warn!("OPENROUTER_API_KEY not set; answering with keyword fallback only");
                None
            }
        };

        let assistant = Arc::new(Assistant::new(source, completion, Clock::system()));
        if !assistant.refresh().await {
            warn!("initial data load failed; serving without restaurant data");
        }

        Ok(Self { config, assistant })
    }

    pub fn from_parts(config: Arc<AppConfig>, assistant: Arc<Assistant>) -> Self {
        Self { config, assistant }
    }
}

#[cfg(test)]
impl AppState {
    fn test_config() -> Arc<AppConfig> {
        use crate::config::{LlmConfig, SheetsConfig};

        Arc::new(AppConfig {
            sheets: SheetsConfig {
                base_url: "https://sheets.fake.local".into(),
                restaurant_info_id: None,
                timings_id: None,
                menu_id: None,
                extras_id: None,
                timeout_secs: 1,
            },
            llm: LlmConfig {
                api_key: None,
                base_url: "https://llm.fake.local".into(),
                model: "test".into(),
                temperature: 0.0,
                max_tokens: 16,
                timeout_secs: 1,
            },
        })
    }

    fn with_source(source: crate::sheets::fakes::StaticSource) -> Self {
        let assistant = Assistant::new(
            Arc::new(source),
            None,
            Clock::new(time::UtcOffset::UTC),
        );
        Self::from_parts(Self::test_config(), Arc::new(assistant))
    }

    /// Sample restaurant already loaded, no completion service.
    pub async fn fake() -> Self {
        let state = Self::with_source(crate::sheets::fakes::StaticSource::sample());
        state.assistant.refresh().await;
        state
    }

    /// Nothing loaded and every fetch fails.
    pub fn fake_empty() -> Self {
        Self::with_source(crate::sheets::fakes::StaticSource::default())
    }
}
