use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

// The service issues entity ids as opaque strings (UUIDs in practice), so
// none of these assume a numeric form.
id_newtype!(CustomerId);
id_newtype!(CategoryId);
id_newtype!(
    /// Stock keeping unit identifier.
    SkuId
);

/// Page areas the storefront renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Categories,
    Cart,
    Orders,
}

impl RegionId {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionId::Categories => "categories-container",
            RegionId::Cart => "cart-container",
            RegionId::Orders => "orders-container",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
