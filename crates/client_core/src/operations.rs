use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use shared::{
    domain::{CategoryId, CustomerId, RegionId, SkuId},
    protocol::{routes, AddCartItemRequest, CreateOrderRequest, UpdateCartItemRequest},
};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{error, info, warn};

use crate::{
    presenter::{Outcome, Presenter},
    transport::{ApiTransport, RequestOptions, TransportError},
};

pub const CATEGORIES_TITLE: &str = "카테고리 목록";
pub const PRODUCTS_TITLE: &str = "상품 목록";

pub fn cart_title(customer_id: &CustomerId) -> String {
    format!("고객 {customer_id}의 장바구니")
}

pub fn orders_title(customer_id: &CustomerId) -> String {
    format!("고객 {customer_id}의 주문 내역")
}

/// Blocking user notice raised by write operations. Implementations return
/// once the user has seen it.
#[async_trait]
pub trait Acknowledger: Send + Sync {
    async fn acknowledge(&self, message: &str);
}

/// Logs notices instead of showing them.
pub struct LogAcknowledger;

#[async_trait]
impl Acknowledger for LogAcknowledger {
    async fn acknowledge(&self, message: &str) {
        info!(notice = message, "acknowledgment");
    }
}

#[derive(Debug, Clone, Copy)]
struct WriteNotices {
    success: &'static str,
    failure: &'static str,
}

const ADD_TO_CART: WriteNotices = WriteNotices {
    success: "상품이 장바구니에 추가되었습니다!",
    failure: "장바구니 추가 실패",
};

const UPDATE_CART_ITEM: WriteNotices = WriteNotices {
    success: "장바구니 상품 수량이 변경되었습니다!",
    failure: "수량 변경 실패",
};

const REMOVE_CART_ITEM: WriteNotices = WriteNotices {
    success: "상품이 장바구니에서 제거되었습니다!",
    failure: "상품 제거 실패",
};

const CLEAR_CART: WriteNotices = WriteNotices {
    success: "장바구니가 비워졌습니다!",
    failure: "장바구니 비우기 실패",
};

const PLACE_ORDER: WriteNotices = WriteNotices {
    success: "주문이 생성되었습니다!",
    failure: "주문 생성 실패",
};

#[derive(Debug, Clone)]
enum Refresh {
    Cart(CustomerId),
    Orders(CustomerId),
}

/// Storefront actions. Reads render into their region and never fail; writes
/// acknowledge, refresh the dependent region and hand the error back.
pub struct StorefrontOperations {
    transport: ApiTransport,
    presenter: Presenter,
    acknowledger: Arc<dyn Acknowledger>,
    refreshes: Mutex<Vec<JoinHandle<()>>>,
}

impl StorefrontOperations {
    pub fn new(
        transport: ApiTransport,
        presenter: Presenter,
        acknowledger: Arc<dyn Acknowledger>,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport,
            presenter,
            acknowledger,
            refreshes: Mutex::new(Vec::new()),
        })
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub async fn list_categories(&self) {
        self.load_region(RegionId::Categories, CATEGORIES_TITLE, &routes::categories())
            .await;
    }

    pub async fn list_products(&self, category_id: Option<CategoryId>) {
        self.load_region(
            RegionId::Categories,
            PRODUCTS_TITLE,
            &routes::products(category_id.as_ref()),
        )
        .await;
    }

    pub async fn fetch_cart(&self, customer_id: CustomerId) {
        self.load_region(
            RegionId::Cart,
            &cart_title(&customer_id),
            &routes::cart(&customer_id),
        )
        .await;
    }

    pub async fn fetch_orders(&self, customer_id: CustomerId) {
        self.load_region(
            RegionId::Orders,
            &orders_title(&customer_id),
            &routes::customer_orders(&customer_id),
        )
        .await;
    }

    pub async fn add_to_cart(
        self: &Arc<Self>,
        customer_id: CustomerId,
        sku_id: SkuId,
        quantity: Option<u32>,
    ) -> Result<Value, TransportError> {
        let options = RequestOptions::post().json(&AddCartItemRequest::new(sku_id, quantity));
        self.mutate(
            &routes::cart_items(&customer_id),
            options,
            ADD_TO_CART,
            Refresh::Cart(customer_id),
        )
        .await
    }

    pub async fn update_cart_item(
        self: &Arc<Self>,
        customer_id: CustomerId,
        sku_id: SkuId,
        quantity: u32,
    ) -> Result<Value, TransportError> {
        let options =
            RequestOptions::put().json(&UpdateCartItemRequest { sku_id, quantity });
        self.mutate(
            &routes::cart_items(&customer_id),
            options,
            UPDATE_CART_ITEM,
            Refresh::Cart(customer_id),
        )
        .await
    }

    pub async fn remove_cart_item(
        self: &Arc<Self>,
        customer_id: CustomerId,
        sku_id: &SkuId,
    ) -> Result<Value, TransportError> {
        self.mutate(
            &routes::cart_item(&customer_id, sku_id),
            Ok(RequestOptions::delete()),
            REMOVE_CART_ITEM,
            Refresh::Cart(customer_id),
        )
        .await
    }

    pub async fn clear_cart(
        self: &Arc<Self>,
        customer_id: CustomerId,
    ) -> Result<Value, TransportError> {
        self.mutate(
            &routes::cart(&customer_id),
            Ok(RequestOptions::delete()),
            CLEAR_CART,
            Refresh::Cart(customer_id),
        )
        .await
    }

    pub async fn place_order(
        self: &Arc<Self>,
        customer_id: CustomerId,
        order: CreateOrderRequest,
    ) -> Result<Value, TransportError> {
        let options = RequestOptions::post().json(&order);
        self.mutate(
            &routes::customer_orders(&customer_id),
            options,
            PLACE_ORDER,
            Refresh::Orders(customer_id),
        )
        .await
    }

    /// Probes service health. Never fails; `None` means unhealthy or
    /// unreachable.
    pub async fn check_health(&self) -> Option<Value> {
        match self
            .transport
            .call(routes::HEALTH, RequestOptions::get())
            .await
        {
            Ok(health) => {
                info!(health = %health, "application status");
                Some(health)
            }
            Err(err) => {
                error!(error = %err, "health check failed");
                None
            }
        }
    }

    /// Waits for every refresh spawned by earlier writes.
    pub async fn settle(&self) {
        let pending = std::mem::take(&mut *self.refreshes.lock().await);
        for result in join_all(pending).await {
            if let Err(err) = result {
                warn!(error = %err, "refresh task ended abnormally");
            }
        }
    }

    async fn load_region(&self, region: RegionId, title: &str, path: &str) {
        self.presenter.render_pending(region);
        let outcome = Outcome::from(self.transport.call(path, RequestOptions::get()).await);
        self.presenter.present(region, title, &outcome);
    }

    async fn mutate(
        self: &Arc<Self>,
        path: &str,
        options: Result<RequestOptions, TransportError>,
        notices: WriteNotices,
        refresh: Refresh,
    ) -> Result<Value, TransportError> {
        let result = match options {
            Ok(options) => self.transport.call(path, options).await,
            Err(err) => {
                error!(path, error = %err, "request body could not be encoded");
                Err(err)
            }
        };

        match result {
            Ok(data) => {
                self.acknowledger.acknowledge(notices.success).await;
                self.spawn_refresh(refresh).await;
                Ok(data)
            }
            Err(err) => {
                self.acknowledger
                    .acknowledge(&format!("{}: {err}", notices.failure))
                    .await;
                Err(err)
            }
        }
    }

    async fn spawn_refresh(self: &Arc<Self>, refresh: Refresh) {
        let operations = Arc::clone(self);
        let handle = tokio::spawn(async move {
            match refresh {
                Refresh::Cart(customer_id) => operations.fetch_cart(customer_id).await,
                Refresh::Orders(customer_id) => operations.fetch_orders(customer_id).await,
            }
        });

        let mut refreshes = self.refreshes.lock().await;
        refreshes.retain(|handle| !handle.is_finished());
        refreshes.push(handle);
    }
}

#[cfg(test)]
#[path = "tests/operations_tests.rs"]
mod tests;
