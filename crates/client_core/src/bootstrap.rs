use std::{future::Future, sync::Arc, time::Duration};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    commands::StorefrontCommand,
    navigation::Navigator,
    operations::{Acknowledger, StorefrontOperations},
    page::HostPage,
    presenter::Presenter,
    transport::{ApiTransport, TransportError},
};

pub const DEFAULT_INITIAL_LOAD_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupTask {
    /// Probe health and log the result. Never rendered, never awaited by
    /// later tasks.
    HealthProbe,
    /// Load categories after `delay`.
    InitialLoad { delay: Duration },
    /// Re-probe health every `interval` for the lifetime of the storefront.
    PeriodicHealth { interval: Duration },
}

/// Ordered list of tasks started once the page is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupPlan {
    tasks: Vec<StartupTask>,
}

impl Default for StartupPlan {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_LOAD_DELAY)
    }
}

impl StartupPlan {
    pub fn new(initial_load_delay: Duration) -> Self {
        Self {
            tasks: vec![
                StartupTask::HealthProbe,
                StartupTask::InitialLoad {
                    delay: initial_load_delay,
                },
            ],
        }
    }

    pub fn from_tasks(tasks: Vec<StartupTask>) -> Self {
        Self { tasks }
    }

    pub fn with_periodic_health(mut self, interval: Duration) -> Self {
        self.tasks.push(StartupTask::PeriodicHealth { interval });
        self
    }

    pub fn tasks(&self) -> &[StartupTask] {
        &self.tasks
    }
}

pub struct Bootstrap {
    operations: Arc<StorefrontOperations>,
    page: Arc<dyn HostPage>,
    plan: StartupPlan,
}

impl Bootstrap {
    pub fn new(
        transport: ApiTransport,
        page: Arc<dyn HostPage>,
        acknowledger: Arc<dyn Acknowledger>,
    ) -> Self {
        let presenter = Presenter::new(Arc::clone(&page));
        Self {
            operations: StorefrontOperations::new(transport, presenter, acknowledger),
            page,
            plan: StartupPlan::default(),
        }
    }

    pub fn with_plan(mut self, plan: StartupPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Waits for `page_ready`, then starts the plan's tasks in order and
    /// hands back the storefront registry.
    pub async fn initialize<F>(self, page_ready: F) -> Storefront
    where
        F: Future<Output = ()>,
    {
        page_ready.await;
        info!("storefront ui ready");

        let mut startup = Vec::new();
        let mut background = Vec::new();
        for task in self.plan.tasks {
            debug!(?task, "starting startup task");
            let operations = Arc::clone(&self.operations);
            match task {
                StartupTask::HealthProbe => startup.push(tokio::spawn(async move {
                    report_health(operations.check_health().await);
                })),
                StartupTask::InitialLoad { delay } => startup.push(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    operations.list_categories().await;
                })),
                StartupTask::PeriodicHealth { interval } if interval.is_zero() => {
                    warn!("periodic health interval is zero; task skipped");
                }
                StartupTask::PeriodicHealth { interval } => {
                    background.push(tokio::spawn(async move {
                        let mut ticker = tokio::time::interval(interval);
                        ticker.tick().await;
                        loop {
                            ticker.tick().await;
                            report_health(operations.check_health().await);
                        }
                    }))
                }
            }
        }

        Storefront {
            operations: self.operations,
            navigator: Navigator::new(self.page),
            startup,
            background,
        }
    }
}

fn report_health(health: Option<Value>) {
    if health.is_some() {
        info!("application is healthy");
    } else {
        warn!("application health check reported a problem");
    }
}

/// Entry points exposed to host-page controls once startup has begun.
pub struct Storefront {
    operations: Arc<StorefrontOperations>,
    navigator: Navigator,
    startup: Vec<JoinHandle<()>>,
    background: Vec<JoinHandle<()>>,
}

impl Storefront {
    pub fn operations(&self) -> &Arc<StorefrontOperations> {
        &self.operations
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Runs one command. Reads resolve to `Ok(None)`; writes resolve to the
    /// service payload; health resolves to the probe result.
    pub async fn dispatch(
        &self,
        command: StorefrontCommand,
    ) -> Result<Option<Value>, TransportError> {
        debug!(command = command.name(), "dispatching storefront command");
        let ops = &self.operations;
        match command {
            StorefrontCommand::LoadCategories => ops.list_categories().await,
            StorefrontCommand::LoadProducts { category_id } => {
                ops.list_products(category_id).await
            }
            StorefrontCommand::LoadCart { customer_id } => ops.fetch_cart(customer_id).await,
            StorefrontCommand::LoadOrders { customer_id } => ops.fetch_orders(customer_id).await,
            StorefrontCommand::AddToCart {
                customer_id,
                sku_id,
                quantity,
            } => return ops.add_to_cart(customer_id, sku_id, quantity).await.map(Some),
            StorefrontCommand::UpdateCartItem {
                customer_id,
                sku_id,
                quantity,
            } => {
                return ops
                    .update_cart_item(customer_id, sku_id, quantity)
                    .await
                    .map(Some)
            }
            StorefrontCommand::RemoveCartItem {
                customer_id,
                sku_id,
            } => return ops.remove_cart_item(customer_id, &sku_id).await.map(Some),
            StorefrontCommand::ClearCart { customer_id } => {
                return ops.clear_cart(customer_id).await.map(Some)
            }
            StorefrontCommand::PlaceOrder { customer_id, order } => {
                return ops.place_order(customer_id, order).await.map(Some)
            }
            StorefrontCommand::CheckHealth => return Ok(ops.check_health().await),
        }
        Ok(None)
    }

    /// Waits for the one-shot startup tasks. Periodic tasks keep running.
    pub async fn wait_for_startup(&mut self) {
        for handle in self.startup.drain(..) {
            if let Err(err) = handle.await {
                warn!(error = %err, "startup task ended abnormally");
            }
        }
    }
}

impl Drop for Storefront {
    fn drop(&mut self) {
        for handle in &self.background {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/bootstrap_tests.rs"]
mod tests;
