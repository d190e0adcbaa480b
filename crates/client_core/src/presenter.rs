use std::sync::Arc;

use serde_json::Value;
use shared::domain::RegionId;
use tracing::debug;

use crate::{
    page::{HostPage, RegionSurface},
    transport::TransportError,
};

/// Tagged result of one transport call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pending,
    Success(Value),
    Failure(String),
}

impl From<Result<Value, TransportError>> for Outcome {
    fn from(value: Result<Value, TransportError>) -> Self {
        match value {
            Ok(data) => Outcome::Success(data),
            Err(err) => Outcome::Failure(err.to_string()),
        }
    }
}

/// What a region shows after a render. Hosts pick the concrete drawing;
/// `to_html` produces the card markup used by the web page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    Loading,
    Success { title: String, body: String },
    Error { message: String },
}

pub const LOADING_LABEL: &str = "로딩 중...";
pub const SUCCESS_BADGE: &str = "성공";
pub const ERROR_BADGE: &str = "오류";
pub const ERROR_HEADING: &str = "API 호출 실패";

impl RegionContent {
    pub fn success(title: impl Into<String>, value: &Value) -> Self {
        RegionContent::Success {
            title: title.into(),
            body: pretty_json(value),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RegionContent::Error {
            message: message.into(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            RegionContent::Loading => {
                format!(r#"<div class="loading"></div> <span>{LOADING_LABEL}</span>"#)
            }
            RegionContent::Success { title, body } => format!(
                concat!(
                    r#"<div class="api-card">"#,
                    r#"<div class="status success">{badge}</div>"#,
                    "<h3>{title}</h3>",
                    r#"<div class="json-display">{body}</div>"#,
                    "</div>"
                ),
                badge = SUCCESS_BADGE,
                title = escape_html(title),
                body = escape_html(body),
            ),
            RegionContent::Error { message } => format!(
                concat!(
                    r#"<div class="api-card">"#,
                    r#"<div class="status error">{badge}</div>"#,
                    "<h3>{heading}</h3>",
                    "<p>{message}</p>",
                    "</div>"
                ),
                badge = ERROR_BADGE,
                heading = ERROR_HEADING,
                message = escape_html(message),
            ),
        }
    }
}

/// Two-space indented rendering. Falls back to the compact form rather than
/// failing.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Escapes the five characters significant in HTML text and quoted
/// attribute values: `&`, `<`, `>`, `"` and `'`. Everything else passes
/// through, including non-ASCII text.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render capability for one region. Detached regions swallow every render.
#[derive(Clone)]
pub struct Region {
    id: RegionId,
    surface: Option<Arc<dyn RegionSurface>>,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn render(&self, content: RegionContent) {
        match &self.surface {
            Some(surface) => surface.replace_content(content),
            None => debug!(region = %self.id, "region not on page; render skipped"),
        }
    }
}

#[derive(Clone)]
pub struct Presenter {
    page: Arc<dyn HostPage>,
}

impl Presenter {
    pub fn new(page: Arc<dyn HostPage>) -> Self {
        Self { page }
    }

    pub fn region(&self, id: RegionId) -> Region {
        Region {
            id,
            surface: self.page.region(id.as_str()),
        }
    }

    pub fn render_pending(&self, id: RegionId) {
        self.region(id).render(RegionContent::Loading);
    }

    pub fn render_success(&self, id: RegionId, title: &str, value: &Value) {
        self.region(id).render(RegionContent::success(title, value));
    }

    pub fn render_failure(&self, id: RegionId, message: &str) {
        self.region(id).render(RegionContent::error(message));
    }

    pub fn present(&self, id: RegionId, title: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Pending => self.render_pending(id),
            Outcome::Success(value) => self.render_success(id, title, value),
            Outcome::Failure(message) => self.render_failure(id, message),
        }
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
