pub mod app;
pub mod assistant;
pub mod config;
pub mod llm;
pub mod restaurant;
pub mod sheets;
pub mod state;
