mod dto;
pub mod fallback;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use services::{Assistant, Phase, StatusView};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::chat_routes())
        .merge(handlers::data_routes())
}
