use tracing::{debug, info, instrument};
use crate::domain::{Product, ProductCreate};
use crate::error::ProductError;
use crate::actor_framework::ResourceClient;
use crate::product_actor::StockAction;

/// Client for the product resource.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_client_new!(ProductClient, Product);
impl_client_listing!(ProductClient, Product, ProductError, products);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.inner.get(id).await.map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<(), ProductError> {
        debug!("Sending request");
        if product.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name is required".to_string()));
        }
        if product.description.trim().is_empty() {
            return Err(ProductError::ValidationError("description is required".to_string()));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(ProductError::ValidationError(format!("invalid price {}", product.price)));
        }
        self.inner.create(product).await.map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }

    /// Writes the full product record back through the edit endpoint.
    #[instrument(skip(self), fields(product_id = product.id, stock = product.stock))]
    pub async fn update_product(&self, product: Product) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner.update(product).await.map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }

    /// Applies a stock action to the given snapshot and writes it back, without
    /// re-reading the product first.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn write_stock(&self, product: &Product, action: StockAction) -> Result<Product, ProductError> {
        let updated = product.apply_stock(action)?;
        self.update_product(updated.clone()).await?;
        info!(stock = updated.stock, "Product stock updated");
        Ok(updated)
    }

    /// Re-reads the product, applies the stock action and writes it back.
    /// Read and write are separate calls; a concurrent writer can interleave.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: i64, action: StockAction) -> Result<Product, ProductError> {
        let current = self.get_product(id).await?.ok_or(ProductError::NotFound(id))?;
        self.write_stock(&current, action).await
    }
}
