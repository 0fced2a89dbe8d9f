use chrono::NaiveDate;

use crate::clients::{OrderDraft, OrderRevision};
use crate::domain::{order_total, validate_quantity, Order, Product, User};
use crate::error::ValidationError;

/// Field state behind the add and edit order dialogs.
///
/// Quantity typed while a product is selected is clamped to that product's
/// available stock. Choosing a product afterwards recomputes the total but
/// does not re-clamp, so submit-time validation still has work to do.
#[derive(Debug, Clone)]
pub struct OrderForm {
    users: Vec<User>,
    products: Vec<Product>,
    user_id: Option<String>,
    user_label: Option<String>,
    product_id: Option<i64>,
    quantity: i64,
    total: f64,
    order_date: String,
    description: String,
    /// Units the edited order already holds: `(product_id, quantity)`.
    held: Option<(i64, u32)>,
}

impl OrderForm {
    /// Empty add-order form dated `today`.
    pub fn new(users: Vec<User>, products: Vec<Product>, today: NaiveDate) -> Self {
        Self {
            users,
            products,
            user_id: None,
            user_label: None,
            product_id: None,
            quantity: 1,
            total: 0.0,
            order_date: today.format("%Y-%m-%d").to_string(),
            description: String::new(),
            held: None,
        }
    }

    /// Edit form prefilled from an existing order. With `count_held_units`, the
    /// order's own units count as available on its current product.
    pub fn for_order(order: &Order, products: Vec<Product>, count_held_units: bool) -> Self {
        let mut form = Self {
            users: Vec::new(),
            products,
            user_id: Some(order.user_id.clone()),
            user_label: Some(order.user_label()),
            product_id: Some(order.product_id),
            quantity: i64::from(order.quantity),
            total: order.total,
            order_date: order.order_date.clone(),
            description: order.description.clone().unwrap_or_default(),
            held: count_held_units.then_some((order.product_id, order.quantity)),
        };
        form.recompute_total();
        form
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// `First Last (username)` of the chosen user.
    pub fn user_label(&self) -> Option<&str> {
        self.user_label.as_deref()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn order_date(&self) -> &str {
        &self.order_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.product_id?;
        self.products.iter().find(|p| p.id == id)
    }

    /// Stock the selected product can give this order.
    pub fn available_stock(&self) -> Option<u32> {
        let product = self.selected_product()?;
        let held = match self.held {
            Some((product_id, quantity)) if product_id == product.id => quantity,
            _ => 0,
        };
        Some(product.stock.saturating_add(held))
    }

    /// Returns false when the user is not in the loaded list.
    pub fn select_user(&mut self, user_id: &str) -> bool {
        if let Some(user) = self.users.iter().find(|u| u.id == user_id) {
            self.user_label = Some(format!("{} {} ({})", user.first_name, user.last_name, user.user_name));
            self.user_id = Some(user_id.to_string());
            true
        } else {
            false
        }
    }

    /// Returns false when the product is not in the loaded list.
    pub fn select_product(&mut self, product_id: i64) -> bool {
        if self.products.iter().any(|p| p.id == product_id) {
            self.product_id = Some(product_id);
            self.recompute_total();
            true
        } else {
            false
        }
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = match self.available_stock() {
            Some(available) => quantity.min(i64::from(available)),
            None => quantity,
        };
        self.recompute_total();
    }

    /// Takes the quantity as given; submit-time validation reports over-stock values.
    pub fn set_quantity_unclamped(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.recompute_total();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    fn recompute_total(&mut self) {
        if let Some(price) = self.selected_product().map(|p| p.price) {
            self.total = order_total(u32::try_from(self.quantity).unwrap_or(0), price);
        }
    }

    /// Submit-time checks shared by both dialogs.
    fn checked_product(&self) -> Result<&Product, ValidationError> {
        let product = self.selected_product().ok_or(ValidationError::MissingProduct)?;
        let available = self.available_stock().unwrap_or(product.stock);
        validate_quantity(self.quantity, available)?;
        if self.user_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(ValidationError::MissingUser);
        }
        Ok(product)
    }

    pub fn draft(&self) -> Result<(OrderDraft, Product), ValidationError> {
        let product = self.checked_product()?.clone();
        let draft = OrderDraft {
            user_id: self.user_id.clone().unwrap_or_default(),
            quantity: self.quantity,
            order_date: self.order_date.clone(),
            description: self.description.clone(),
        };
        Ok((draft, product))
    }

    pub fn revision(&self) -> Result<(OrderRevision, Product), ValidationError> {
        let product = self.checked_product()?.clone();
        let revision = OrderRevision {
            quantity: self.quantity,
            description: self.description.clone(),
        };
        Ok((revision, product))
    }
}
