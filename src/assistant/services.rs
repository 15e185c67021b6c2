use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument, warn};

use super::fallback;
use crate::llm::{CompletionError, CompletionService, Recovery};
use crate::restaurant::model::{DEFAULT_NAME, NOT_AVAILABLE};
use crate::restaurant::{Clock, RestaurantData};
use crate::sheets::{load_restaurant, DataSource};

pub const NO_DATA_APOLOGY: &str = "Sorry, I couldn't load restaurant data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoData,
    Ready,
    AwaitingAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub name: String,
    pub is_open: bool,
    pub time: String,
    pub rating: String,
}

impl StatusView {
    fn closed_default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            is_open: false,
            time: String::new(),
            rating: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Owns the current restaurant snapshot and answers questions against it.
pub struct Assistant {
    source: Arc<dyn DataSource>,
    completion: Option<Arc<dyn CompletionService>>,
    clock: Clock,
    model: RwLock<Option<Arc<RestaurantData>>>,
    in_flight: Mutex<()>,
}

impl Assistant {
    pub fn new(
        source: Arc<dyn DataSource>,
        completion: Option<Arc<dyn CompletionService>>,
        clock: Clock,
    ) -> Self {
        Self {
            source,
            completion,
            clock,
            model: RwLock::new(None),
            in_flight: Mutex::new(()),
        }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub async fn snapshot(&self) -> Option<Arc<RestaurantData>> {
        self.model.read().await.clone()
    }

    pub async fn phase(&self) -> Phase {
        if self.in_flight.try_lock().is_err() {
            return Phase::AwaitingAnswer;
        }
        match self.snapshot().await {
            Some(_) => Phase::Ready,
            None => Phase::NoData,
        }
    }

    /// Rebuilds the model from the data source. The old snapshot survives a failed load.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let outcome = load_restaurant(self.source.as_ref()).await;
        if outcome.is_total_failure() {
            warn!("no dataset could be fetched; keeping previous data");
            return false;
        }
        if !outcome.failed.is_empty() {
            warn!(failed = ?outcome.failed, "refreshed with partial data");
        }
        *self.model.write().await = Some(Arc::new(outcome.data));
        info!("restaurant data refreshed");
        true
    }

    #[instrument(skip(self))]
    pub async fn process_query(&self, question: &str) -> String {
        let _guard = self.in_flight.lock().await;

        let Some(data) = self.snapshot().await else {
            warn!("query received without restaurant data");
            return NO_DATA_APOLOGY.to_string();
        };

        let now = self.clock.now();
        let answer = match self.complete(&data, question, now).await {
            Ok(answer) => answer,
            Err(e) => match e.recovery() {
                Recovery::Fallback => {
                    warn!(error = %e, "completion unavailable; using fallback");
                    fallback::respond(question, &data, now)
                }
            },
        };
        answer.trim().to_string()
    }

    async fn complete(
        &self,
        data: &RestaurantData,
        question: &str,
        now: time::OffsetDateTime,
    ) -> Result<String, CompletionError> {
        let service = self
            .completion
            .as_ref()
            .ok_or(CompletionError::NotConfigured)?;
        let context = data.to_context_at(now);
        service.complete(&context, question).await
    }

    pub async fn get_status(&self) -> StatusView {
        match self.snapshot().await {
            Some(data) => {
                let status = data.is_open_at(self.clock.now());
                StatusView {
                    name: data.name().to_string(),
                    is_open: status.is_open,
                    time: status.time,
                    rating: data.rating().to_string(),
                }
            }
            None => StatusView::closed_default(),
        }
    }
}
