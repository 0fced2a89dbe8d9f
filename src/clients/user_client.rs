use tracing::{debug, instrument};
use crate::domain::{User, UserCreate};
use crate::error::UserError;
use crate::actor_framework::ResourceClient;

/// Client for the user resource.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_client_new!(UserClient, User);
impl_client_listing!(UserClient, User, UserError, users);
impl_client_paging!(UserClient, User, UserError, users);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, user: UserCreate) -> Result<(), UserError> {
        debug!("Sending request");
        let missing = [
            ("username", &user.user_name),
            ("first name", &user.first_name),
            ("last name", &user.last_name),
            ("password", &user.password),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
        if let Some((field, _)) = missing {
            return Err(UserError::ValidationError(format!("{field} is required")));
        }
        self.inner.create(user).await.map_err(|e| UserError::ActorCommunicationError(e.to_string()))
    }

    /// Submits the full user record to the edit endpoint.
    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn update_user(&self, user: User) -> Result<(), UserError> {
        debug!("Sending request");
        self.inner.update(user).await.map_err(|e| UserError::ActorCommunicationError(e.to_string()))
    }
}
