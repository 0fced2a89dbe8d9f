use std::fmt::{Debug, Display};
use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn, Instrument};

use crate::domain::Page;
use crate::error::FrameworkError;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait and routes)
// =============================================================================

/// HTTP verb the API expects on a resource's `edit` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMethod {
    Post,
    Put,
}

/// Trait that any API resource must implement to be served by a ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: Clone + Debug + Display + Send + Sync + Serialize + 'static;
    type CreatePayload: Debug + Send + Sync + Serialize + 'static;
    type Update: Debug + Send + Sync + Serialize + 'static;

    /// Collection path, e.g. `/api/users`. Paging, single-item, edit and
    /// delete routes hang off it.
    const COLLECTION: &'static str;

    /// Route returning every record at once.
    const ALL: &'static str = Self::COLLECTION;

    const EDIT_METHOD: EditMethod = EditMethod::Post;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<()>,
    },
    ListAll {
        respond_to: Response<Vec<T>>,
    },
    ListPage {
        page: u32,
        size: u32,
        respond_to: Response<Page<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        update: T::Update,
        respond_to: Response<()>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the HTTP client for one resource. Every request runs in its own task
/// and answers on its oneshot channel, so a slow call never holds up the others.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        http: reqwest::Client,
        base_url: &str,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(resource = T::COLLECTION))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            let http = self.http.clone();
            let base_url = Arc::clone(&self.base_url);
            tokio::spawn(dispatch(http, base_url, msg).in_current_span());
        }
        info!("ResourceActor stopped");
    }
}

async fn dispatch<T: Entity>(http: reqwest::Client, base_url: Arc<str>, msg: ResourceRequest<T>) {
    let collection = format!("{}{}", base_url, T::COLLECTION);
    match msg {
        ResourceRequest::Create { payload, respond_to } => {
            debug!(?payload, "POST {}", collection);
            let result = send_unit(http.post(&collection).json(&payload)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::ListAll { respond_to } => {
            let url = format!("{}{}", base_url, T::ALL);
            debug!("GET {}", url);
            let result = send_json::<Vec<T>>(http.get(&url)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::ListPage { page, size, respond_to } => {
            debug!(page, size, "GET {}", collection);
            let request = http.get(&collection).query(&[("page", page), ("size", size)]);
            let result = send_json::<Page<T>>(request).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::Get { id, respond_to } => {
            let url = format!("{}/{}", collection, id);
            debug!("GET {}", url);
            let result = match http.get(&url).send().await {
                Ok(response) if response.status() == StatusCode::NOT_FOUND => Ok(None),
                Ok(response) => decode::<T>(response).await.map(Some),
                Err(e) => Err(FrameworkError::from(e)),
            };
            let _ = respond_to.send(result);
        }
        ResourceRequest::Update { update, respond_to } => {
            let url = format!("{}/edit", collection);
            let request = match T::EDIT_METHOD {
                EditMethod::Post => http.post(&url),
                EditMethod::Put => http.put(&url),
            };
            debug!(?update, method = ?T::EDIT_METHOD, "{}", url);
            let result = send_unit(request.json(&update)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::Delete { id, respond_to } => {
            let url = format!("{}/delete", collection);
            debug!(%id, "DELETE {}", url);
            let result = send_unit(http.delete(&url).query(&[("id", &id)])).await;
            let _ = respond_to.send(result);
        }
    }
}

async fn send_json<R: DeserializeOwned>(request: RequestBuilder) -> Result<R, FrameworkError> {
    let response = request.send().await?;
    decode(response).await
}

async fn send_unit(request: RequestBuilder) -> Result<(), FrameworkError> {
    let response = check_status(request.send().await?).await?;
    // The acknowledgement body carries nothing the client needs.
    let body = response.text().await.unwrap_or_default();
    debug!(body = %body, "Request acknowledged");
    Ok(())
}

async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, FrameworkError> {
    let response = check_status(response).await?;
    Ok(response.json::<R>().await?)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FrameworkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), body = %body, "Request rejected");
    Err(FrameworkError::Status { status: status.as_u16(), body })
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Create { payload, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list_all(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::ListAll { respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list_page(&self, page: u32, size: u32) -> Result<Page<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::ListPage { page, size, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Get { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, update: T::Update) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Update { update, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Delete { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{delete, get, put};
    use axum::{Json, Router};
    use serde::Deserialize;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: u32,
        label: String,
    }

    impl Entity for Widget {
        type Id = u32;
        type CreatePayload = String;
        type Update = Widget;

        const COLLECTION: &'static str = "/api/widgets";
        const ALL: &'static str = "/api/widgets/all";
        const EDIT_METHOD: EditMethod = EditMethod::Put;
    }

    async fn widget_page(Query(q): Query<HashMap<String, u32>>) -> Json<Page<Widget>> {
        let page = q.get("page").copied().unwrap_or(0);
        let size = q.get("size").copied().unwrap_or(0);
        Json(Page {
            data: vec![Widget { id: page * 100 + size, label: "paged".into() }],
            page_count: 4,
        })
    }

    async fn widget_by_id(Path(id): Path<u32>) -> Result<Json<Widget>, AxumStatus> {
        if id == 1 {
            Ok(Json(Widget { id, label: "one".into() }))
        } else {
            Err(AxumStatus::NOT_FOUND)
        }
    }

    async fn spawn_widget_server() -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/api/widgets", get(widget_page).post(|| async { AxumStatus::CREATED }))
            .route("/api/widgets/all", get(|| async { Json(vec![Widget { id: 1, label: "one".into() }]) }))
            .route("/api/widgets/edit", put(|| async { AxumStatus::INTERNAL_SERVER_ERROR }))
            .route("/api/widgets/delete", delete(|| async { AxumStatus::OK }))
            .route("/api/widgets/:id", get(widget_by_id));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/")
    }

    fn start(base_url: &str) -> ResourceClient<Widget> {
        let (actor, client) = ResourceActor::<Widget>::new(8, reqwest::Client::new(), base_url);
        tokio::spawn(actor.run());
        client
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_over_http() {
        let client = start(&spawn_widget_server().await);

        let page = client.list_page(2, 5).await.unwrap();
        assert_eq!(page.page_count, 4);
        assert_eq!(page.data[0].id, 205);

        let all = client.list_all().await.unwrap();
        assert_eq!(all.len(), 1);

        assert_eq!(client.get(1).await.unwrap().map(|w| w.label), Some("one".to_string()));
        assert_eq!(client.get(2).await.unwrap(), None);

        client.create("new".to_string()).await.unwrap();
        client.delete(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let client = start(&spawn_widget_server().await);

        let err = client
            .update(Widget { id: 1, label: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = start(&format!("http://{addr}"));
        let err = client.list_all().await.unwrap_err();
        assert!(matches!(err, FrameworkError::Transport(_)));
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (actor, client) = ResourceActor::<Widget>::new(1, reqwest::Client::new(), "http://localhost");
        drop(actor);
        assert_eq!(client.list_all().await.unwrap_err(), FrameworkError::ActorClosed);
    }
}
