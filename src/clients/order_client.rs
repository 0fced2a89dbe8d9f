use tracing::{error, info, instrument, warn};
use crate::domain::{order_total, validate_quantity, Order, OrderCreate, OrderUpdate, Product};
use crate::error::{OrderError, ProductError};
use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::product_actor::StockAction;

/// A new order as entered by the operator, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_id: String,
    pub quantity: i64,
    pub order_date: String,
    pub description: String,
}

/// Changes to an existing order. The product is passed alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRevision {
    pub quantity: i64,
    pub description: String,
}

/// What happened to product stock after an order write went through.
///
/// The order write and the stock write are separate calls, so a stock failure
/// never undoes the order.
#[derive(Debug, Clone, PartialEq)]
pub enum StockSync {
    Adjusted { product_id: i64, stock: u32 },
    /// The order's reserved quantity did not change.
    Unchanged,
    /// Stock reconciliation on update is switched off.
    Skipped,
    Failed { product_id: i64, reason: String },
}

impl StockSync {
    fn from_result(product_id: i64, result: Result<Product, ProductError>) -> Self {
        match result {
            Ok(product) => StockSync::Adjusted { product_id, stock: product.stock },
            Err(e) => {
                error!(error = %e, product_id, "Error updating product stock");
                StockSync::Failed { product_id, reason: e.to_string() }
            }
        }
    }
}

/// Client for interacting with the Order resource.
///
/// This client handles the order/stock orchestration: every order write is
/// followed by a write to the referenced product's stock.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    product_client: ProductClient,
    reconcile_stock_on_update: bool,
}

impl_client_paging!(OrderClient, Order, OrderError, orders);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        product_client: ProductClient,
        reconcile_stock_on_update: bool,
    ) -> Self {
        Self {
            inner,
            product_client,
            reconcile_stock_on_update,
        }
    }

    /// Validates the quantity, posts the order, then takes the quantity out of
    /// the product's stock using the product snapshot the form was built from.
    #[instrument(skip(self, draft, product), fields(user_id = %draft.user_id, product_id = product.id, quantity = draft.quantity))]
    pub async fn create_order(&self, draft: OrderDraft, product: &Product) -> Result<StockSync, OrderError> {
        info!("Processing create_order request");

        let quantity = validate_quantity(draft.quantity, product.stock).map_err(|e| {
            warn!(stock = product.stock, "{e}");
            e
        })?;

        let payload = OrderCreate {
            user_id: draft.user_id,
            order_date: draft.order_date,
            quantity,
            product_id: product.id,
            total: order_total(quantity, product.price),
            description: draft.description,
        };

        if let Err(e) = self.inner.create(payload).await {
            error!(error = %e, "Error adding order");
            return Err(OrderError::ActorCommunicationError(e.to_string()));
        }
        info!("Order created successfully");

        let result = self.product_client.write_stock(product, StockAction::Reserve(quantity)).await;
        Ok(StockSync::from_result(product.id, result))
    }

    /// Validates and submits the full order to the edit endpoint.
    ///
    /// When stock reconciliation is on, units this order already holds count
    /// as available if the product is unchanged, and the quantity difference is
    /// applied afterwards. Switching products returns the old reservation and
    /// takes the new quantity from the new product.
    #[instrument(skip(self, original, revision, product), fields(order_id = original.id, product_id = product.id, quantity = revision.quantity))]
    pub async fn update_order(
        &self,
        original: &Order,
        revision: OrderRevision,
        product: &Product,
    ) -> Result<StockSync, OrderError> {
        info!("Processing update_order request");

        let same_product = original.product_id == product.id;
        let available = if self.reconcile_stock_on_update && same_product {
            product.stock.saturating_add(original.quantity)
        } else {
            product.stock
        };
        let quantity = validate_quantity(revision.quantity, available).map_err(|e| {
            warn!(available, "{e}");
            e
        })?;

        let update = OrderUpdate {
            id: original.id,
            user_id: original.user_id.clone(),
            product_id: product.id,
            quantity,
            total: order_total(quantity, product.price),
            order_date: original.order_date.clone(),
            description: revision.description,
        };

        if let Err(e) = self.inner.update(update).await {
            error!(error = %e, "Error updating order");
            return Err(OrderError::ActorCommunicationError(e.to_string()));
        }
        info!("Order updated successfully");

        if !self.reconcile_stock_on_update {
            return Ok(StockSync::Skipped);
        }

        if same_product {
            let Some(action) = StockAction::for_change(original.quantity, quantity) else {
                return Ok(StockSync::Unchanged);
            };
            let result = self.product_client.adjust_stock(product.id, action).await;
            return Ok(StockSync::from_result(product.id, result));
        }

        let released = self
            .product_client
            .adjust_stock(original.product_id, StockAction::Release(original.quantity))
            .await;
        if let sync @ StockSync::Failed { .. } = StockSync::from_result(original.product_id, released) {
            return Ok(sync);
        }
        let reserved = self.product_client.adjust_stock(product.id, StockAction::Reserve(quantity)).await;
        Ok(StockSync::from_result(product.id, reserved))
    }

    /// Deletes the order, then re-reads its product and returns the quantity to stock.
    #[instrument(skip(self, order), fields(order_id = order.id, product_id = order.product_id, quantity = order.quantity))]
    pub async fn delete_order(&self, order: &Order) -> Result<StockSync, OrderError> {
        info!("Deleting order");

        if let Err(e) = self.inner.delete(order.id).await {
            error!(error = %e, "Error deleting order");
            return Err(OrderError::ActorCommunicationError(e.to_string()));
        }
        info!("Order deleted successfully");

        let result = self
            .product_client
            .adjust_stock(order.product_id, StockAction::Release(order.quantity))
            .await;
        Ok(StockSync::from_result(order.product_id, result))
    }
}
