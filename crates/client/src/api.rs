//! Events API calls

use async_trait::async_trait;
use common::{Event, EventDraft, Filter};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::constants::{TYPE_QUERY_PARAM, USER_AGENT};
use crate::error::ApiError;

/// Operations the UI needs from an events backend
#[async_trait]
pub trait EventApi: Send + Sync {
    /// Lists events, narrowed to one type unless `filter` is [`Filter::All`]
    async fn list_events(&self, filter: Filter) -> Result<Vec<Event>, ApiError>;

    /// Creates an event and returns the record as stored by the backend
    async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError>;
}

/// reqwest-backed client for a json-server style `/events` collection
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EventsClient {
    /// Creates a client for the collection at `base_url`
    /// (e.g. `http://localhost:3004/events`)
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl EventApi for EventsClient {
    async fn list_events(&self, filter: Filter) -> Result<Vec<Event>, ApiError> {
        let mut request = self.http.get(self.base_url.clone());
        if let Some(kind) = filter.query_value() {
            request = request.query(&[(TYPE_QUERY_PARAM, kind)]);
        }

        debug!("Listing events ({})", filter.label());
        let events: Vec<Event> = read_json(request.send().await?).await?;
        debug!("Received {} events", events.len());
        Ok(events)
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        debug!("Creating event '{}'", draft.title);
        let response = self
            .http
            .post(self.base_url.clone())
            .json(draft)
            .send()
            .await?;

        let event: Event = read_json(response).await?;
        debug!("Backend assigned id {}", event.id);
        Ok(event)
    }
}

/// Checks the status and decodes a JSON body
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Events backend returned {}: {}", status, body);
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{EventId, EventType};
    use events_server::{AppState, ServerHandle, start_server};

    fn draft(title: &str, kind: EventType) -> EventDraft {
        EventDraft {
            title: title.into(),
            date: "March 5".into(),
            time: "19:30".into(),
            cover: "cover.png".into(),
            composer: "Giuseppe Verdi".into(),
            kind,
        }
    }

    async fn spawn_backend() -> ServerHandle {
        start_server(AppState::default(), "127.0.0.1", 0).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let server = spawn_backend().await;
        let client = EventsClient::new(&server.events_url()).unwrap();

        let created = client
            .create_event(&draft("Aida", EventType::Opera))
            .await
            .unwrap();
        assert_eq!(created.id, EventId::Number(1));
        assert_eq!(created.draft, draft("Aida", EventType::Opera));

        let events = client.list_events(Filter::All).await.unwrap();
        assert_eq!(events, vec![created]);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_list_with_type_filter() {
        let server = spawn_backend().await;
        let client = EventsClient::new(&server.events_url()).unwrap();

        client.create_event(&draft("Aida", EventType::Opera)).await.unwrap();
        client.create_event(&draft("Giselle", EventType::Ballet)).await.unwrap();
        client.create_event(&draft("Tosca", EventType::Opera)).await.unwrap();

        let operas = client
            .list_events(Filter::Only(EventType::Opera))
            .await
            .unwrap();
        let titles: Vec<&str> = operas.iter().map(|e| e.title()).collect();
        assert_eq!(titles, ["Aida", "Tosca"]);

        let ballets = client
            .list_events(Filter::Only(EventType::Ballet))
            .await
            .unwrap();
        assert_eq!(ballets.len(), 1);
        assert_eq!(ballets[0].kind(), EventType::Ballet);

        assert_eq!(client.list_events(Filter::All).await.unwrap().len(), 3);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_error_status_is_returned() {
        let server = spawn_backend().await;
        let client = EventsClient::new(&format!("{}/missing", server.base_url())).unwrap();

        let err = client.list_events(Filter::All).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(err.status(), Some(404));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_unexpected_body_is_a_decode_error() {
        let server = spawn_backend().await;
        let client = EventsClient::new(&format!("{}/health", server.base_url())).unwrap();

        let err = client.list_events(Filter::All).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = EventsClient::new(&format!("http://127.0.0.1:{}/events", port)).unwrap();
        let err = client
            .create_event(&draft("Aida", EventType::Opera))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = EventsClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_query_string_follows_filter() {
        use axum::{Json, Router, extract::RawQuery, routing::get};
        use std::sync::{Arc, Mutex};

        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let recorder = seen.clone();
        let router = Router::new().route(
            "/events",
            get(move |RawQuery(query): RawQuery| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(query);
                    Json(Vec::<Event>::new())
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });

        let client = EventsClient::new(&format!("http://{}/events", addr)).unwrap();
        client.list_events(Filter::All).await.unwrap();
        client
            .list_events(Filter::Only(EventType::Opera))
            .await
            .unwrap();
        client
            .list_events(Filter::Only(EventType::Ballet))
            .await
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("type=opera".to_string()), Some("type=ballet".to_string())]
        );
    }

    #[test]
    fn test_base_url_is_kept() {
        let client = EventsClient::new("http://localhost:3004/events").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3004/events");
    }
}
