use tracing::{error, info, instrument, warn};

use super::dialog::Dialog;
use super::notice::Notice;
use crate::clients::ProductClient;
use crate::domain::{Product, ProductCreate};
use crate::error::ProductError;

const TITLE: &str = "Product Status";

/// Unpaged product list with the add dialog.
pub struct ProductManager {
    client: ProductClient,
    rows: Vec<Product>,
    pub add_dialog: Dialog,
}

impl ProductManager {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            rows: Vec::new(),
            add_dialog: Dialog::default(),
        }
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    /// Fetches every product. On failure the previous rows stay in place.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        match self.client.all_products().await {
            Ok(products) => {
                info!(count = products.len(), "Fetched products");
                self.rows = products;
            }
            Err(e) => error!(error = %e, "Error fetching products"),
        }
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&mut self, product: ProductCreate) {
        self.add_dialog.open();
        if !self.add_dialog.begin_submit() {
            return;
        }
        match self.client.create_product(product).await {
            Ok(()) => {
                info!("Product added successfully");
                self.add_dialog.succeed(Notice::success(TITLE, "Product added successfully"));
                self.refresh().await;
            }
            Err(ProductError::ValidationError(reason)) => {
                warn!(%reason, "Product form rejected");
                self.add_dialog.reject(Notice::error(TITLE, reason));
            }
            Err(e) => {
                error!(error = %e, "Error adding product");
                self.add_dialog.fail(Notice::error(TITLE, "Error adding product"));
            }
        }
    }
}
