use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument};

use crate::clients::RestClient;
use crate::error::ApiError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A record that lives in a remote REST collection, addressed by its id.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + Debug + Display + AsRef<str> + Send + Sync;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        item: T,
        respond_to: Response<()>,
    },
    Update {
        id: T::Id,
        item: T,
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

/// Serves collection requests one at a time against the REST backend.
///
/// The actor stops once every [`ResourceClient`] has been dropped.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    rest: RestClient,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, rest: RestClient) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, rest };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(url = %self.rest.base_url()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let result = self.rest.list::<T>().await;
                    match &result {
                        Ok(items) => info!(item_count = items.len(), "Listed collection"),
                        Err(e) => error!(error = %e, "List failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Create { item, respond_to } => {
                    let result = self.rest.create(&item).await;
                    log_mutation("create", item.id(), &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update { id, item, respond_to } => {
                    let result = self.rest.update(id.as_ref(), &item).await;
                    log_mutation("update", &id, &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = self.rest.delete(id.as_ref()).await;
                    log_mutation("delete", &id, &result);
                    let _ = respond_to.send(result);
                }
            }
        }

        info!("ResourceActor stopped");
    }
}

fn log_mutation(op: &str, id: &impl Display, result: &Result<(), ApiError>) {
    match result {
        Ok(()) => info!(op, id = %id, "Mutation accepted"),
        Err(e) => error!(op, id = %id, error = %e, "Mutation failed"),
    }
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
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.dispatch(ResourceRequest::List { respond_to }).await?;
        response.await.map_err(|_| dropped())?
    }

    pub async fn create(&self, item: T) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.dispatch(ResourceRequest::Create { item, respond_to }).await?;
        response.await.map_err(|_| dropped())?
    }

    pub async fn update(&self, id: T::Id, item: T) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.dispatch(ResourceRequest::Update { id, item, respond_to }).await?;
        response.await.map_err(|_| dropped())?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.dispatch(ResourceRequest::Delete { id, respond_to }).await?;
        response.await.map_err(|_| dropped())?
    }

    async fn dispatch(&self, request: ResourceRequest<T>) -> Result<(), ApiError> {
        debug!("Sending resource request");
        self.sender
            .send(request)
            .await
            .map_err(|_| ApiError::ActorCommunicationError("Actor closed".to_string()))
    }
}

fn dropped() -> ApiError {
    ApiError::ActorCommunicationError("Actor dropped".to_string())
}

// =============================================================================
// 5. END-TO-END AGAINST A MOCK SERVER
// =============================================================================
