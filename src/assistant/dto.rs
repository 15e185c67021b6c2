use serde::{Deserialize, Serialize};

use crate::restaurant::{MealWindow, OpenStatus, TimingEntry};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
}

#[derive(Debug, Serialize)]
pub struct HoursResponse {
    pub status: OpenStatus,
    pub weekly: Vec<TimingEntry>,
    pub meals: Vec<MealWindow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}
