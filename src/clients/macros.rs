/// Generates the unpaged `all_<plural>` listing for a client wrapping a `ResourceClient`.
#[macro_export]
macro_rules! impl_client_listing {
    ($client_name:ident, $entity:ty, $error:ty, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<all_ $plural>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list_all().await.map_err(|e| <$error>::ActorCommunicationError(e.to_string()))
                }
            }
        }
    };
}

/// Generates the paged `list_<plural>` method for a client wrapping a `ResourceClient`.
#[macro_export]
macro_rules! impl_client_paging {
    ($client_name:ident, $entity:ty, $error:ty, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural>](&self, page: u32, size: u32) -> Result<$crate::domain::Page<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list_page(page, size).await.map_err(|e| <$error>::ActorCommunicationError(e.to_string()))
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}
