pub mod bootstrap;
pub mod commands;
pub mod navigation;
pub mod operations;
pub mod page;
pub mod presenter;
pub mod transport;

pub use bootstrap::{Bootstrap, StartupPlan, StartupTask, Storefront};
pub use commands::StorefrontCommand;
pub use navigation::{ClickDisposition, Navigator};
pub use operations::{Acknowledger, LogAcknowledger, StorefrontOperations};
pub use page::{HostPage, RegionSurface, ScrollBehavior};
pub use presenter::{Outcome, Presenter, Region, RegionContent};
pub use transport::{ApiTransport, RequestOptions, TransportConfig, TransportError};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
