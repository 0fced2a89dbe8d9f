use tracing::{info, error};
use crate::clients::{OrderClient, UserClient, ProductClient};
use crate::actor_framework::ResourceActor;
use crate::config::Settings;
use crate::domain::{User, Product, Order};

/// The main application system that wires the resource actors to their clients.
///
/// All three actors share one HTTP connection pool and the same base URL.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    pub fn new(settings: &Settings) -> Self {
        info!(api_base_url = %settings.api_base_url, "Starting order system");
        let http = reqwest::Client::new();
        let base_url = settings.api_base_url.as_str();
        let capacity = settings.channel_capacity;

        // 1. Users
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(capacity, http.clone(), base_url);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Products
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(capacity, http.clone(), base_url);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Orders (coordinates product stock)
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(capacity, http, base_url);
        let order_client = OrderClient::new(
            order_resource_client,
            product_client.clone(),
            settings.reconcile_stock_on_update,
        );
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            order_client,
            user_client,
            product_client,
            handles: vec![user_handle, product_handle, order_handle],
        }
    }

    /// Drops every client handle and waits for the actors to drain.
    ///
    /// Clones handed out elsewhere (e.g. to managers) must be dropped first,
    /// otherwise the actors keep running.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
