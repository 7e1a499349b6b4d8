use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{EventDraft, EventType, Filter};
use serde::Deserialize;
use tracing::{info, warn};

use crate::state::AppState;

/// Query string of `GET /events`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Simple health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.book.read().await.len();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "events-server",
            "version": env!("CARGO_PKG_VERSION"),
            "events": count
        })),
    )
}

/// `GET /events[?type=opera|ballet]`
///
/// An unknown type matches nothing, the way json-server's equality filter does.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let book = state.book.read().await;
    let events = match params.kind.as_deref() {
        None => book.list(Filter::All),
        Some(value) => match EventType::parse(value) {
            Some(kind) => book.list(Filter::Only(kind)),
            None => Vec::new(),
        },
    };
    Json(events)
}

/// `POST /events`
pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> impl IntoResponse {
    match state.book.write().await.insert(draft) {
        Ok(event) => {
            info!("Created event {} '{}'", event.id, event.title());
            (StatusCode::CREATED, Json(serde_json::json!(event)))
        }
        Err(e) => {
            warn!("Failed to create event: {}", e);
            (
                StatusCode::CONFLICT,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::create_router;
    use crate::state::EventBook;
    use axum::{body::Body, http::Request};
    use common::Event;
    use tower::ServiceExt;

    const BALLET: &str = r#"{"title":"Giselle","date":"May 12","time":"18:00",
        "cover":"giselle.png","composer":"Adolphe Adam","type":"ballet"}"#;

    const BALLET_WITH_ID: &str = r#"{"id":1,"title":"Giselle","date":"May 12","time":"18:00",
        "cover":"giselle.png","composer":"Adolphe Adam","type":"ballet"}"#;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_returns_created_event() {
        let app = create_router(AppState::default());

        let response = app
            .oneshot(
                Request::post("/events")
                    .header("content-type", "application/json")
                    .body(Body::from(BALLET))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let event: Event = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(event.title(), "Giselle");
        assert_eq!(event.id.to_string(), "1");
    }

    #[tokio::test]
    async fn test_post_with_missing_field_is_rejected() {
        let app = create_router(AppState::default());

        let response = app
            .oneshot(
                Request::post("/events")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":"Giselle"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_type_lists_nothing() {
        let state = AppState::default();
        state
            .book
            .write()
            .await
            .insert(serde_json::from_str(BALLET).unwrap())
            .unwrap();
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(Request::get("/events?type=musical").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));

        let response = app
            .oneshot(Request::get("/events?type=ballet").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_post_after_last_id_is_a_conflict() {
        let mut last = serde_json::from_str::<Event>(BALLET_WITH_ID).unwrap();
        last.id = common::EventId::Number(u64::MAX - 1);
        let app = create_router(AppState::new(EventBook::with_events(vec![last]).unwrap()));

        let post = || {
            Request::post("/events")
                .header("content-type", "application/json")
                .body(Body::from(BALLET))
                .unwrap()
        };

        let response = app.clone().oneshot(post()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["id"], serde_json::json!(u64::MAX));

        let response = app.clone().oneshot(post()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(Request::get("/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
    }
}
