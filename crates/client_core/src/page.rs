//! Host page boundary: the addressable areas the storefront writes into and
//! the scroll capability used for in-page navigation.

use std::sync::Arc;

use crate::presenter::RegionContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A live display area. Each call replaces whatever was shown before.
pub trait RegionSurface: Send + Sync {
    fn replace_content(&self, content: RegionContent);
}

pub trait HostPage: Send + Sync {
    /// Returns `None` when the page has no element with this id.
    fn region(&self, id: &str) -> Option<Arc<dyn RegionSurface>>;

    /// Returns `false` when the page has no element with this id.
    fn scroll_into_view(&self, id: &str, behavior: ScrollBehavior) -> bool;
}
