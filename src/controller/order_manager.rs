use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use tracing::{error, info, instrument, warn};

use super::dialog::Dialog;
use super::notice::Notice;
use super::order_form::OrderForm;
use crate::clients::{OrderClient, ProductClient, StockSync, UserClient};
use crate::domain::{Order, Product, User};
use crate::error::OrderError;

const TITLE: &str = "Order Status";

/// Paged order list with expandable detail rows and the add, edit and delete dialogs.
///
/// Every successful write re-fetches the current page.
pub struct OrderManager {
    orders: OrderClient,
    users: UserClient,
    products: ProductClient,
    count_held_units: bool,
    page: u32,
    page_size: u32,
    page_count: u32,
    rows: Vec<Order>,
    expanded: HashSet<i64>,
    pub add_dialog: Dialog,
    pub edit_dialog: Dialog,
    pub delete_dialog: Dialog,
    add_form: Option<OrderForm>,
    edit_form: Option<(Order, OrderForm)>,
    pending_delete: Option<Order>,
}

impl OrderManager {
    pub fn new(
        orders: OrderClient,
        users: UserClient,
        products: ProductClient,
        page_size: u32,
        count_held_units: bool,
    ) -> Self {
        Self {
            orders,
            users,
            products,
            count_held_units,
            page: 1,
            page_size,
            page_count: 1,
            rows: Vec::new(),
            expanded: HashSet::new(),
            add_dialog: Dialog::default(),
            edit_dialog: Dialog::default(),
            delete_dialog: Dialog::default(),
            add_form: None,
            edit_form: None,
            pending_delete: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn rows(&self) -> &[Order] {
        &self.rows
    }

    pub fn is_expanded(&self, order_id: i64) -> bool {
        self.expanded.contains(&order_id)
    }

    pub fn toggle_details(&mut self, order_id: i64) {
        if !self.expanded.remove(&order_id) {
            self.expanded.insert(order_id);
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded.extend(self.rows.iter().map(|o| o.id));
    }

    /// Fetches the current page. On failure the previous rows stay in place.
    #[instrument(skip(self), fields(page = self.page, size = self.page_size))]
    pub async fn refresh(&mut self) {
        match self.orders.list_orders(self.page, self.page_size).await {
            Ok(page) => {
                info!(count = page.data.len(), page_count = page.page_count, "Fetched orders");
                self.rows = page.data;
                self.page_count = page.page_count;
            }
            Err(e) => error!(error = %e, "Error fetching orders"),
        }
    }

    /// Page-selector callback; the next `refresh` fetches this page.
    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.set_page(page);
        self.refresh().await;
    }

    async fn load_products(&self) -> Vec<Product> {
        self.products.all_products().await.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching products");
            Vec::new()
        })
    }

    async fn load_users(&self) -> Vec<User> {
        self.users.all_users().await.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching users");
            Vec::new()
        })
    }

    // ----- add -----

    /// Opens the add dialog with every user and product loaded, dated today.
    pub async fn open_add(&mut self) -> &mut OrderForm {
        self.open_add_on(Utc::now().date_naive()).await
    }

    pub async fn open_add_on(&mut self, today: NaiveDate) -> &mut OrderForm {
        let users = self.load_users().await;
        let products = self.load_products().await;
        self.add_dialog.open();
        self.add_form.insert(OrderForm::new(users, products, today))
    }

    #[instrument(skip(self))]
    pub async fn submit_add(&mut self) {
        let Some(form) = self.add_form.as_ref() else {
            return;
        };
        let (draft, product) = match form.draft() {
            Ok(parts) => parts,
            Err(e) => {
                warn!("{e}");
                self.add_dialog.reject(Notice::error(TITLE, e.to_string()));
                return;
            }
        };
        if !self.add_dialog.begin_submit() {
            return;
        }
        match self.orders.create_order(draft, &product).await {
            Ok(sync) => {
                info!(?sync, "New order added");
                self.add_form = None;
                self.add_dialog.succeed(Notice::success(TITLE, "New order added successfully"));
                self.refresh().await;
            }
            Err(OrderError::Validation(e)) => {
                self.add_dialog.reject(Notice::error(TITLE, e.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Error adding order");
                self.add_dialog.fail(Notice::error(TITLE, "Error adding order"));
            }
        }
    }

    // ----- edit -----

    /// Finds an order on the current page, or scans the other pages for it.
    #[instrument(skip(self))]
    pub async fn locate(&self, order_id: i64) -> Option<Order> {
        if let Some(order) = self.rows.iter().find(|o| o.id == order_id) {
            return Some(order.clone());
        }
        let start = self.page;
        for page in (1..=self.page_count).filter(|p| *p != start) {
            match self.orders.list_orders(page, self.page_size).await {
                Ok(found) => {
                    if let Some(order) = found.data.into_iter().find(|o| o.id == order_id) {
                        return Some(order);
                    }
                }
                Err(e) => {
                    error!(error = %e, page, "Error fetching orders");
                    return None;
                }
            }
        }
        None
    }

    /// Opens the edit dialog prefilled from the order.
    pub async fn open_edit(&mut self, order_id: i64) -> Option<&mut OrderForm> {
        let Some(order) = self.locate(order_id).await else {
            self.edit_dialog.reject(Notice::error(TITLE, format!("Order {order_id} not found")));
            return None;
        };
        let products = self.load_products().await;
        let form = OrderForm::for_order(&order, products, self.count_held_units);
        self.edit_dialog.open();
        let (_, form) = self.edit_form.insert((order, form));
        Some(form)
    }

    #[instrument(skip(self))]
    pub async fn submit_edit(&mut self) {
        let Some((original, form)) = self.edit_form.as_ref() else {
            return;
        };
        let (revision, product) = match form.revision() {
            Ok(parts) => parts,
            Err(e) => {
                warn!("{e}");
                self.edit_dialog.reject(Notice::error(TITLE, e.to_string()));
                return;
            }
        };
        let original = original.clone();
        if !self.edit_dialog.begin_submit() {
            return;
        }
        match self.orders.update_order(&original, revision, &product).await {
            Ok(sync) => {
                info!(?sync, "Order updated");
                self.edit_form = None;
                self.edit_dialog.succeed(Notice::success(TITLE, "Order updated successfully"));
                self.refresh().await;
            }
            Err(OrderError::Validation(e)) => {
                self.edit_dialog.reject(Notice::error(TITLE, e.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Error updating order");
                self.edit_dialog.fail(Notice::error(TITLE, "Error updating order"));
            }
        }
    }

    // ----- delete -----

    /// Opens the delete confirmation for an order.
    pub async fn open_delete(&mut self, order_id: i64) -> Option<&Order> {
        let Some(order) = self.locate(order_id).await else {
            self.delete_dialog.reject(Notice::error(TITLE, format!("Order {order_id} not found")));
            return None;
        };
        self.delete_dialog.open();
        Some(self.pending_delete.insert(order))
    }

    /// Deletes the pending order and returns its quantity to stock. Any failure
    /// along the chain keeps the confirmation open and the list as it was.
    /// Once the order itself is gone a second confirm sends nothing.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&mut self) {
        let Some(order) = self.pending_delete.clone() else {
            return;
        };
        if !self.delete_dialog.begin_submit() {
            return;
        }
        match self.orders.delete_order(&order).await {
            Ok(StockSync::Failed { product_id, reason }) => {
                error!(product_id, %reason, "Order deleted but stock was not restored");
                self.pending_delete = None;
                self.delete_dialog
                    .fail(Notice::error(TITLE, "Error deleting order or updating product stock"));
            }
            Ok(sync) => {
                info!(?sync, "Order deleted");
                self.pending_delete = None;
                self.expanded.remove(&order.id);
                self.delete_dialog.succeed(Notice::success(TITLE, "Order deleted successfully"));
                self.refresh().await;
            }
            Err(e) => {
                error!(error = %e, "Error deleting order");
                self.delete_dialog
                    .fail(Notice::error(TITLE, "Error deleting order or updating product stock"));
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.delete_dialog.close();
    }
}
