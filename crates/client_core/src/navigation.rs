use std::sync::Arc;

use tracing::debug;

use crate::page::{HostPage, ScrollBehavior};

/// What the host should do with a link click after the navigator saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    PreventDefault,
    Default,
}

#[derive(Clone)]
pub struct Navigator {
    page: Arc<dyn HostPage>,
}

impl Navigator {
    pub fn new(page: Arc<dyn HostPage>) -> Self {
        Self { page }
    }

    /// In-page anchors (`#section`) are handled here with a smooth scroll;
    /// every other target is left to the host.
    pub fn on_link_click(&self, href: &str) -> ClickDisposition {
        match href.strip_prefix('#') {
            Some(section_id) => {
                self.scroll_to_section(section_id);
                ClickDisposition::PreventDefault
            }
            None => ClickDisposition::Default,
        }
    }

    pub fn scroll_to_section(&self, section_id: &str) -> bool {
        let scrolled = self
            .page
            .scroll_into_view(section_id, ScrollBehavior::Smooth);
        if !scrolled {
            debug!(section = section_id, "anchor target not on page");
        }
        scrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryPage;

    #[test]
    fn anchor_links_scroll_smoothly_and_suppress_navigation() {
        let page = MemoryPage::with_regions(&["cart-container"]);
        let navigator = Navigator::new(page.clone());

        assert_eq!(
            navigator.on_link_click("#cart-container"),
            ClickDisposition::PreventDefault
        );
        assert_eq!(
            page.scrolls(),
            vec![("cart-container".to_string(), ScrollBehavior::Smooth)]
        );
    }

    #[test]
    fn external_links_keep_default_navigation() {
        let page = MemoryPage::with_regions(&["cart-container"]);
        let navigator = Navigator::new(page.clone());

        assert_eq!(
            navigator.on_link_click("/swagger-ui.html"),
            ClickDisposition::Default
        );
        assert_eq!(
            navigator.on_link_click("https://example.com/#cart-container"),
            ClickDisposition::Default
        );
        assert!(page.scrolls().is_empty());
    }

    #[test]
    fn missing_anchor_target_is_silently_ignored() {
        let page = MemoryPage::with_regions(&[]);
        let navigator = Navigator::new(page.clone());

        assert_eq!(
            navigator.on_link_click("#nowhere"),
            ClickDisposition::PreventDefault
        );
        assert!(!navigator.scroll_to_section("nowhere"));
        assert!(page.scrolls().is_empty());
    }
}
