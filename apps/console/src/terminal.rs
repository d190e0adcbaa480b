//! Terminal host: each storefront region prints its content as it changes.

use std::{
    collections::HashMap,
    io::{self, Write},
    sync::Arc,
};

use async_trait::async_trait;
use client_core::{
    presenter::{ERROR_BADGE, ERROR_HEADING, LOADING_LABEL, SUCCESS_BADGE},
    Acknowledger, HostPage, RegionContent, RegionSurface, ScrollBehavior,
};
use shared::domain::RegionId;

pub fn render_text(region_id: &str, content: &RegionContent) -> String {
    match content {
        RegionContent::Loading => format!("[{region_id}] {LOADING_LABEL}"),
        RegionContent::Success { title, body } => {
            format!("[{region_id}] {SUCCESS_BADGE} · {title}\n{body}")
        }
        RegionContent::Error { message } => {
            format!("[{region_id}] {ERROR_BADGE} · {ERROR_HEADING}\n{message}")
        }
    }
}

struct TerminalRegion {
    id: String,
}

impl RegionSurface for TerminalRegion {
    fn replace_content(&self, content: RegionContent) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", render_text(&self.id, &content));
    }
}

pub struct TerminalPage {
    regions: HashMap<String, Arc<TerminalRegion>>,
}

impl TerminalPage {
    pub fn storefront() -> Self {
        let regions = [RegionId::Categories, RegionId::Cart, RegionId::Orders]
            .into_iter()
            .map(|id| {
                (
                    id.as_str().to_string(),
                    Arc::new(TerminalRegion {
                        id: id.as_str().to_string(),
                    }),
                )
            })
            .collect();
        Self { regions }
    }
}

impl HostPage for TerminalPage {
    fn region(&self, id: &str) -> Option<Arc<dyn RegionSurface>> {
        self.regions
            .get(id)
            .map(|region| Arc::clone(region) as Arc<dyn RegionSurface>)
    }

    fn scroll_into_view(&self, id: &str, behavior: ScrollBehavior) -> bool {
        if !self.regions.contains_key(id) {
            return false;
        }
        println!("-> #{id} ({behavior:?})");
        true
    }
}

/// Prints the notice and flushes before returning, so it is on screen ahead
/// of any refresh output.
pub struct TerminalAcknowledger;

#[async_trait]
impl Acknowledger for TerminalAcknowledger {
    async fn acknowledge(&self, message: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "! {message}");
        let _ = out.flush();
    }
}
