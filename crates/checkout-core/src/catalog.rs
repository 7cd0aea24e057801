//! # Product Catalog
//!
//! Trusted product records for the Rise storefront.
//! The catalog is loaded once at startup (from `config/products.toml` or the
//! built-in table) and is the single source of truth for names, prices, and
//! options; anything the client echoes back is verified against it.

use serde::{Deserialize, Serialize};

/// Transaction currency, ISO 4217, fixed process-wide
pub const CURRENCY: &str = "gbp";

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "rise-cushion-sand")
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price in integer minor units (pence)
    pub unit_amount: i64,

    /// Optional image path, resolved against the front-end origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Colors offered for this product
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Product {
    /// Check whether a color is offered for this product
    pub fn allows_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

/// Immutable product catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// The shipped Rise cushion line-up. Used when no catalog file is found.
    pub fn builtin() -> Self {
        let colors = |cs: &[&str]| cs.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        Self {
            products: vec![
                Product {
                    id: "rise-cushion-sand".to_string(),
                    name: "Rise Seat Lift Cushion".to_string(),
                    unit_amount: 8900,
                    image: Some("/product-hero.png".to_string()),
                    colors: colors(&["Sand", "Sage", "Slate"]),
                },
                Product {
                    id: "rise-cushion-sage".to_string(),
                    name: "Rise Seat Lift Cushion - Sage".to_string(),
                    unit_amount: 8900,
                    image: Some("/product-sage.jpg".to_string()),
                    colors: colors(&["Sage"]),
                },
                Product {
                    id: "rise-cushion-slate".to_string(),
                    name: "Rise Seat Lift Cushion - Slate".to_string(),
                    unit_amount: 8900,
                    image: Some("/product-slate.jpg".to_string()),
                    colors: colors(&["Slate"]),
                },
            ],
        }
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
