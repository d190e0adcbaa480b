use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use url::Url;

use crate::{
    operations::{Acknowledger, StorefrontOperations},
    page::{HostPage, RegionSurface, ScrollBehavior},
    presenter::{Presenter, RegionContent},
    transport::{ApiTransport, TransportConfig},
};

#[derive(Default)]
pub struct MemoryRegion {
    history: Mutex<Vec<RegionContent>>,
}

impl RegionSurface for MemoryRegion {
    fn replace_content(&self, content: RegionContent) {
        self.history.lock().expect("region lock").push(content);
    }
}

pub struct MemoryPage {
    regions: HashMap<String, Arc<MemoryRegion>>,
    scrolls: Mutex<Vec<(String, ScrollBehavior)>>,
}

impl MemoryPage {
    pub fn with_regions(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            regions: ids
                .iter()
                .map(|id| (id.to_string(), Arc::new(MemoryRegion::default())))
                .collect(),
            scrolls: Mutex::new(Vec::new()),
        })
    }

    pub fn storefront() -> Arc<Self> {
        Self::with_regions(&["categories-container", "cart-container", "orders-container"])
    }

    pub fn history(&self, id: &str) -> Vec<RegionContent> {
        self.regions
            .get(id)
            .map(|region| region.history.lock().expect("region lock").clone())
            .unwrap_or_default()
    }

    pub fn content(&self, id: &str) -> Option<RegionContent> {
        self.history(id).last().cloned()
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.content(id).map(|content| content.to_html())
    }

    pub fn scrolls(&self) -> Vec<(String, ScrollBehavior)> {
        self.scrolls.lock().expect("scroll lock").clone()
    }
}

impl HostPage for MemoryPage {
    fn region(&self, id: &str) -> Option<Arc<dyn RegionSurface>> {
        self.regions
            .get(id)
            .map(|region| Arc::clone(region) as Arc<dyn RegionSurface>)
    }

    fn scroll_into_view(&self, id: &str, behavior: ScrollBehavior) -> bool {
        if !self.regions.contains_key(id) {
            return false;
        }
        self.scrolls
            .lock()
            .expect("scroll lock")
            .push((id.to_string(), behavior));
        true
    }
}

#[derive(Default)]
pub struct RecordingAcknowledger {
    messages: Mutex<Vec<String>>,
}

impl RecordingAcknowledger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("ack lock").clone()
    }
}

#[async_trait]
impl Acknowledger for RecordingAcknowledger {
    async fn acknowledge(&self, message: &str) {
        self.messages
            .lock()
            .expect("ack lock")
            .push(message.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// In-process stand-in for the storefront API. Records every request and
/// answers from a table keyed by `"{METHOD} {path?query}"`.
#[derive(Clone, Default)]
pub struct MockService {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
}

impl MockService {
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.responses
            .lock()
            .expect("responses lock")
            .insert(format!("{method} {path}"), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }
}

async fn handle_any(
    State(service): State<MockService>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let key = format!("{method} {path}");

    service
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method,
            path,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    let (status, body) = service
        .responses
        .lock()
        .expect("responses lock")
        .get(&key)
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, r#"{"error":"not found"}"#.to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn spawn_mock_service() -> Result<(Url, MockService)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let service = MockService::default();
    let app = Router::new()
        .fallback(handle_any)
        .with_state(service.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}"))?, service))
}

/// Origin with nothing listening behind it.
pub async fn unreachable_origin() -> Result<Url> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}"))?)
}

pub fn transport_for(origin: Url) -> ApiTransport {
    ApiTransport::new(TransportConfig::new(origin))
}

pub fn operations_for(
    origin: Url,
    page: Arc<MemoryPage>,
    acknowledger: Arc<RecordingAcknowledger>,
) -> Arc<StorefrontOperations> {
    StorefrontOperations::new(transport_for(origin), Presenter::new(page), acknowledger)
}
