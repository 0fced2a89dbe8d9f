use crate::actor_framework::{EditMethod, Entity};
use crate::domain::{Product, ProductCreate};

impl Entity for Product {
    type Id = i64;
    type CreatePayload = ProductCreate;
    type Update = Product;

    const COLLECTION: &'static str = "/api/products";
    const EDIT_METHOD: EditMethod = EditMethod::Put;
}
