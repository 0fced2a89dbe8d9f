use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "productName")]
    pub name: String,
    #[serde(rename = "productDescription", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "productPrice")]
    pub price: f64,
    #[serde(rename = "productStock")]
    pub stock: u32,
    /// Fields the server sent that this client does not model. They are echoed
    /// back untouched when the product is written with a new stock level.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreate {
    #[serde(rename = "productName")]
    pub name: String,
    #[serde(rename = "productDescription")]
    pub description: String,
    #[serde(rename = "productPrice")]
    pub price: f64,
    #[serde(rename = "productStock")]
    pub stock: u32,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            stock,
            extra: Map::new(),
        }
    }
}
