use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, CustomerId, SkuId};

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_CART_QUANTITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub sku_id: SkuId,
    pub quantity: u32,
}

impl AddCartItemRequest {
    pub fn new(sku_id: SkuId, quantity: Option<u32>) -> Self {
        Self {
            sku_id,
            quantity: quantity.unwrap_or(DEFAULT_CART_QUANTITY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub sku_id: SkuId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub shipping_address: String,
    pub billing_address: String,
    #[serde(default)]
    pub notes: String,
}

impl CreateOrderRequest {
    pub fn new(
        shipping_address: impl Into<String>,
        billing_address: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            shipping_address: shipping_address.into(),
            billing_address: billing_address.into(),
            notes: notes.unwrap_or_default(),
        }
    }
}

/// Path templates relative to the API base prefix. Interpolated ids are
/// percent-encoded, so `/`, `#` and `?` inside an id stay within its segment.
pub mod routes {
    use url::form_urlencoded;

    use super::*;

    pub const HEALTH: &str = "/actuator/health";

    /// Encodes one path segment. `byte_serialize` only ever emits `+` for a
    /// space, which a path reads literally, so it becomes `%20`.
    fn segment(raw: &str) -> String {
        form_urlencoded::byte_serialize(raw.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    }

    pub fn categories() -> String {
        "/catalog/categories".to_string()
    }

    pub fn products(category_id: Option<&CategoryId>) -> String {
        match category_id {
            Some(category_id) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("categoryId", category_id.as_str())
                    .finish();
                format!("/catalog/products?{query}")
            }
            None => "/catalog/products".to_string(),
        }
    }

    pub fn cart(customer_id: &CustomerId) -> String {
        format!("/cart/{}", segment(customer_id.as_str()))
    }

    pub fn cart_items(customer_id: &CustomerId) -> String {
        format!("{}/items", cart(customer_id))
    }

    pub fn cart_item(customer_id: &CustomerId, sku_id: &SkuId) -> String {
        format!("{}/{}", cart_items(customer_id), segment(sku_id.as_str()))
    }

    pub fn customer_orders(customer_id: &CustomerId) -> String {
        format!("/orders/customer/{}", segment(customer_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_cart_item_defaults_quantity_to_one() {
        let body = AddCartItemRequest::new(SkuId::new("SKU1"), None);
        assert_eq!(
            serde_json::to_string(&body).expect("serialize"),
            r#"{"skuId":"SKU1","quantity":1}"#
        );
    }

    #[test]
    fn create_order_keeps_field_order_and_empty_notes() {
        let body = CreateOrderRequest::new("Seoul", "Busan", None);
        assert_eq!(
            serde_json::to_string(&body).expect("serialize"),
            r#"{"shippingAddress":"Seoul","billingAddress":"Busan","notes":""}"#
        );
    }

    #[test]
    fn products_route_toggles_category_query() {
        assert_eq!(routes::products(None), "/catalog/products");
        assert_eq!(
            routes::products(Some(&CategoryId::new("5"))),
            "/catalog/products?categoryId=5"
        );
        assert_eq!(
            routes::products(Some(&CategoryId::new("a&b=c d"))),
            "/catalog/products?categoryId=a%26b%3Dc+d"
        );
    }

    #[test]
    fn customer_routes_interpolate_ids() {
        let customer = CustomerId::new("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(
            routes::cart(&customer),
            "/cart/550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(
            routes::cart_items(&CustomerId::new("42")),
            "/cart/42/items"
        );
        assert_eq!(
            routes::cart_item(&CustomerId::new("42"), &SkuId::new("SKU1")),
            "/cart/42/items/SKU1"
        );
        assert_eq!(
            routes::customer_orders(&CustomerId::new("7")),
            "/orders/customer/7"
        );
    }

    #[test]
    fn path_segments_escape_reserved_characters() {
        let customer = CustomerId::new("5");
        assert_eq!(
            routes::cart_item(&customer, &SkuId::new("SKU#1")),
            "/cart/5/items/SKU%231"
        );
        assert_eq!(
            routes::cart_item(&customer, &SkuId::new("A/B")),
            "/cart/5/items/A%2FB"
        );
        assert_eq!(
            routes::cart(&CustomerId::new("a b?c")),
            "/cart/a%20b%3Fc"
        );
    }
}
