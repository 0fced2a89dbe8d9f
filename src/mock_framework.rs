//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_update`] to assert behavior.

use crate::actor_framework::{Entity, Response, ResourceClient, ResourceRequest};
use crate::domain::Page;
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends its requests to a channel the test owns instead of a
/// running `ResourceActor`, so the test decides every answer (success,
/// failure, or nothing at all) and no HTTP server is involved.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Update, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { update, respond_to }) => Some((update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ListPage request
pub async fn expect_list_page<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(u32, u32, Response<Page<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::ListPage { page, size, respond_to }) => Some((page, size, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ListAll request
pub async fn expect_list_all<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::ListAll { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        // Test Create
        let create_task = tokio::spawn(async move {
            let user = UserCreate {
                user_name: "test".to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                password: "secret".to_string(),
            };
            client.create(user).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.user_name, "test");
        responder.send(Ok(())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(()));
    }
}
