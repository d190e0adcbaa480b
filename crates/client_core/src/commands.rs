//! Named storefront actions that host-page controls can trigger.

use shared::{
    domain::{CategoryId, CustomerId, SkuId},
    protocol::CreateOrderRequest,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontCommand {
    LoadCategories,
    LoadProducts {
        category_id: Option<CategoryId>,
    },
    LoadCart {
        customer_id: CustomerId,
    },
    LoadOrders {
        customer_id: CustomerId,
    },
    AddToCart {
        customer_id: CustomerId,
        sku_id: SkuId,
        quantity: Option<u32>,
    },
    UpdateCartItem {
        customer_id: CustomerId,
        sku_id: SkuId,
        quantity: u32,
    },
    RemoveCartItem {
        customer_id: CustomerId,
        sku_id: SkuId,
    },
    ClearCart {
        customer_id: CustomerId,
    },
    PlaceOrder {
        customer_id: CustomerId,
        order: CreateOrderRequest,
    },
    CheckHealth,
}

impl StorefrontCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StorefrontCommand::LoadCategories => "load_categories",
            StorefrontCommand::LoadProducts { .. } => "load_products",
            StorefrontCommand::LoadCart { .. } => "load_cart",
            StorefrontCommand::LoadOrders { .. } => "load_orders",
            StorefrontCommand::AddToCart { .. } => "add_to_cart",
            StorefrontCommand::UpdateCartItem { .. } => "update_cart_item",
            StorefrontCommand::RemoveCartItem { .. } => "remove_cart_item",
            StorefrontCommand::ClearCart { .. } => "clear_cart",
            StorefrontCommand::PlaceOrder { .. } => "place_order",
            StorefrontCommand::CheckHealth => "check_health",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StorefrontCommand::AddToCart { .. }
                | StorefrontCommand::UpdateCartItem { .. }
                | StorefrontCommand::RemoveCartItem { .. }
                | StorefrontCommand::ClearCart { .. }
                | StorefrontCommand::PlaceOrder { .. }
        )
    }
}
