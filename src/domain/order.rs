use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Multiplier applied to an order subtotal to get the VAT-inclusive total.
pub const VAT_MULTIPLIER: f64 = 1.20;

/// Represents a customer order, with the user and product fields the API
/// denormalizes into every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub order_date: String,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub product_price: f64,
    #[serde(rename = "orderQuantity")]
    pub quantity: u32,
    #[serde(rename = "orderTotal")]
    pub total: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub user_id: String,
    pub order_date: String,
    #[serde(rename = "orderQuantity")]
    pub quantity: u32,
    pub product_id: i64,
    #[serde(rename = "orderTotal")]
    pub total: f64,
    pub description: String,
}

/// Full order record submitted to the edit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    #[serde(rename = "orderQuantity")]
    pub quantity: u32,
    #[serde(rename = "orderTotal")]
    pub total: f64,
    pub order_date: String,
    pub description: String,
}

impl Order {
    pub fn new(id: i64, user_id: impl Into<String>, product_id: i64, quantity: u32, total: f64) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            user_name: None,
            first_name: None,
            last_name: None,
            order_date: String::new(),
            product_id,
            product_name: None,
            product_description: None,
            product_price: 0.0,
            quantity,
            total,
            description: None,
        }
    }

    /// User label shown in the edit dialog: `First Last (username)`.
    pub fn user_label(&self) -> String {
        format!(
            "{} {} ({})",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default(),
            self.user_name.as_deref().unwrap_or_default(),
        )
    }
}

/// VAT-inclusive total, rounded to cents.
pub fn order_total(quantity: u32, unit_price: f64) -> f64 {
    let total = f64::from(quantity) * unit_price * VAT_MULTIPLIER;
    (total * 100.0).round() / 100.0
}

/// Checks a requested quantity against the stock currently available.
/// The stock bound is checked before the lower bound.
pub fn validate_quantity(quantity: i64, stock: u32) -> Result<u32, ValidationError> {
    if quantity > i64::from(stock) {
        return Err(ValidationError::ExceedsStock);
    }
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    // 0 < quantity <= stock, so it fits in u32.
    Ok(quantity as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_includes_vat() {
        assert_eq!(order_total(3, 100.0), 360.0);
        assert_eq!(order_total(1, 19.99), 23.99);
        assert_eq!(order_total(0, 50.0), 0.0);
    }

    #[test]
    fn total_rounds_to_cents() {
        // 7 * 0.33 * 1.2 = 2.772
        assert_eq!(order_total(7, 0.33), 2.77);
        // 5 * 2.5 * 1.2 = 15.0 exactly
        assert_eq!(order_total(5, 2.5), 15.0);
    }

    #[test]
    fn quantity_within_stock_is_accepted() {
        assert_eq!(validate_quantity(1, 10), Ok(1));
        assert_eq!(validate_quantity(10, 10), Ok(10));
    }

    #[test]
    fn quantity_over_stock_is_rejected() {
        assert_eq!(validate_quantity(12, 10), Err(ValidationError::ExceedsStock));
        assert_eq!(
            ValidationError::ExceedsStock.to_string(),
            "Quantity exceeds available stock."
        );
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert_eq!(validate_quantity(0, 10), Err(ValidationError::NonPositiveQuantity));
        assert_eq!(validate_quantity(-3, 10), Err(ValidationError::NonPositiveQuantity));
        assert_eq!(validate_quantity(0, 0), Err(ValidationError::NonPositiveQuantity));
        assert_eq!(validate_quantity(1, 0), Err(ValidationError::ExceedsStock));
    }

    #[test]
    fn order_rows_decode_with_missing_optionals() {
        let raw = r#"{"id":9,"userId":"u1","userName":"alice","firstName":"Alice","lastName":"L",
            "orderDate":"2024-05-01","productId":3,"productName":"Lamp","productPrice":20.0,
            "orderQuantity":2,"orderTotal":48.0,"description":null}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.quantity, 2);
        assert_eq!(order.description, None);
        assert_eq!(order.product_description, None);
        assert_eq!(order.user_label(), "Alice L (alice)");
    }

    #[test]
    fn create_payload_uses_api_field_names() {
        let payload = OrderCreate {
            user_id: "u1".into(),
            order_date: "2024-05-01".into(),
            quantity: 3,
            product_id: 7,
            total: 360.0,
            description: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["orderQuantity"], 3);
        assert_eq!(value["orderTotal"], 360.0);
        assert_eq!(value["productId"], 7);
        assert_eq!(value["orderDate"], "2024-05-01");
    }
}
