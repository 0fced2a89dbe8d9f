//! Typed clients over the resource actors.

#[macro_use]
mod macros;
pub mod user_client;
pub mod product_client;
pub mod order_client;

pub use user_client::UserClient;
pub use product_client::ProductClient;
pub use order_client::{OrderClient, OrderDraft, OrderRevision, StockSync};
