use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use super::dto::{ChatRequest, ChatResponse, HoursResponse, MenuQuery, RefreshResponse};
use super::services::StatusView;
use crate::restaurant::{Record, RestaurantData};
use crate::state::AppState;

/// Quick-start prompts shown above the chat box.
pub const SUGGESTIONS: [&str; 4] = [
    "What's on the menu?",
    "Are you open now?",
    "Where are you located?",
    "What's popular?",
];

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/status", get(status))
        .route("/refresh", post(refresh))
        .route("/suggestions", get(suggestions))
}

pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/hours", get(hours))
        .route("/menu", get(menu))
        .route("/menu/categories", get(categories))
        .route("/menu/bestsellers", get(bestsellers))
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let question = payload.question.trim();
    if question.is_empty() {
        warn!("empty question");
        return Err((StatusCode::BAD_REQUEST, "Question is required".into()));
    }
    let answer = state.assistant.process_query(question).await;
    Ok(Json(ChatResponse { answer }))
}

#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<StatusView> {
    Json(state.assistant.get_status().await)
}

#[instrument(skip(state))]
pub async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    let refreshed = state.assistant.refresh().await;
    Json(RefreshResponse { refreshed })
}

pub async fn suggestions() -> Json<Vec<&'static str>> {
    Json(SUGGESTIONS.to_vec())
}

#[instrument(skip(state))]
pub async fn hours(
    State(state): State<AppState>,
) -> Result<Json<HoursResponse>, (StatusCode, String)> {
    let data = loaded(&state).await?;
    let status = data.is_open_at(state.assistant.clock().now());
    Ok(Json(HoursResponse {
        status,
        weekly: data.timings.weekly.clone(),
        meals: data.timings.meals.clone(),
    }))
}

/// `category` and `q` narrow the menu together when both are given.
#[instrument(skip(state))]
pub async fn menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<Record>>, (StatusCode, String)> {
    let data = loaded(&state).await?;
    let mut items = match query.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => data.get_menu_by_category(category),
        _ => data.menu.clone(),
    };
    if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let hits = data.search_menu(q);
        items.retain(|item| hits.contains(item));
    }
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let data = loaded(&state).await?;
    Ok(Json(data.get_categories()))
}

#[instrument(skip(state))]
pub async fn bestsellers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, (StatusCode, String)> {
    let data = loaded(&state).await?;
    Ok(Json(data.get_bestsellers()))
}

async fn loaded(state: &AppState) -> Result<Arc<RestaurantData>, (StatusCode, String)> {
    state.assistant.snapshot().await.ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Restaurant data not loaded".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::app::build_app;

    async fn send(state: AppState, req: Request<Body>) -> (StatusCode, Value) {
        let res = build_app(state).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let res = build_app(AppState::fake().await)
            .oneshot(get("/api/v1/health"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn chat_answers_through_fallback() {
        let (status, body) = send(
            AppState::fake().await,
            post_json("/api/v1/chat", r#"{"question":"Where are you located?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let answer = body["answer"].as_str().unwrap();
        assert!(answer.contains("12 Market Street"));
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let res = build_app(AppState::fake().await)
            .oneshot(post_json("/api/v1/chat", r#"{"question":"   "}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_without_data_apologizes() {
        let (status, body) = send(
            AppState::fake_empty(),
            post_json("/api/v1/chat", r#"{"question":"menu?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["answer"],
            "Sorry, I couldn't load restaurant data. Please try again."
        );
    }

    #[tokio::test]
    async fn status_defaults_without_data() {
        let (_, body) = send(AppState::fake_empty(), get("/api/v1/status")).await;
        assert_eq!(body["name"], "HFC");
        assert_eq!(body["is_open"], false);
        assert_eq!(body["time"], "");
        assert_eq!(body["rating"], "N/A");
    }

    #[tokio::test]
    async fn refresh_reports_outcome() {
        let (_, body) = send(AppState::fake().await, post_json("/api/v1/refresh", "")).await;
        assert_eq!(body["refreshed"], true);

        let (_, body) = send(AppState::fake_empty(), post_json("/api/v1/refresh", "")).await;
        assert_eq!(body["refreshed"], false);
    }

    #[tokio::test]
    async fn suggestions_are_listed() {
        let (_, body) = send(AppState::fake_empty(), get("/api/v1/suggestions")).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0], "What's on the menu?");
    }

    #[tokio::test]
    async fn hours_need_data() {
        let (status, _) = send(AppState::fake_empty(), get("/api/v1/hours")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = send(AppState::fake().await, get("/api/v1/hours")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weekly"].as_array().unwrap().len(), 2);
        assert_eq!(body["meals"][0]["meal_type"], "Lunch");
        assert!(body["status"]["day"].is_string());
    }

    #[tokio::test]
    async fn menu_filters_by_category_and_query() {
        let state = AppState::fake().await;
        let (_, all) = send(state.clone(), get("/api/v1/menu")).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, sides) = send(state.clone(), get("/api/v1/menu?category=SIDES")).await;
        assert_eq!(sides.as_array().unwrap().len(), 1);
        assert_eq!(sides[0]["Item_Name"], "Hot Wings");

        let (_, none) = send(state.clone(), get("/api/v1/menu?category=sides&q=crispy")).await;
        assert!(none.as_array().unwrap().is_empty());

        let (_, crispy) = send(state, get("/api/v1/menu?q=crispy")).await;
        assert_eq!(crispy[0]["Item_Name"], "Zinger Burger");
    }

    #[tokio::test]
    async fn categories_and_bestsellers() {
        let state = AppState::fake().await;
        let (_, cats) = send(state.clone(), get("/api/v1/menu/categories")).await;
        assert_eq!(cats, serde_json::json!(["Burgers", "Sides"]));

        let (_, best) = send(state, get("/api/v1/menu/bestsellers")).await;
        assert_eq!(best.as_array().unwrap().len(), 1);
        assert_eq!(best[0]["Regular_Price"], "5.99");
    }
}
