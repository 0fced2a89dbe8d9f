use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderUpdate};

impl Entity for Order {
    type Id = i64;
    type CreatePayload = OrderCreate;
    type Update = OrderUpdate;

    const COLLECTION: &'static str = "/api/orders";
}
