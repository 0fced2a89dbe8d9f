use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate};

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Update = User;

    const COLLECTION: &'static str = "/api/users";
    const ALL: &'static str = "/api/users/all";
}
