//! # Mock Framework
//!
//! Utilities for testing the screen without a backend.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers like
//! [`expect_list`] or [`expect_create`] to assert the requests and play the
//! server's answer. [`ScriptedPrompt`] stands in for the user.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};
use crate::error::ApiError;
use crate::screen_actor::Prompt;

type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls instead of a running
/// `ResourceActor`, so each server answer (success, failure) is chosen by the
/// test, deterministically and in order.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, item, respond_to }) => Some((id, item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// What a [`ScriptedPrompt`] has been shown so far.
#[derive(Debug, Default)]
pub struct PromptLog {
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
}

/// A user who answers confirmations from a script. Unscripted questions are
/// answered no.
#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<bool>>>,
    log: Arc<Mutex<PromptLog>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            log: Arc::default(),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.log.lock().unwrap().alerts.clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.log.lock().unwrap().confirmations.clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn alert(&mut self, message: &str) {
        self.log.lock().unwrap().alerts.push(message.to_string());
    }

    async fn confirm(&mut self, message: &str) -> bool {
        self.log.lock().unwrap().confirmations.push(message.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move { client.create(Product::new("T1", "Test", 1.0, 1)).await });

        let (item, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(item.code, "T1");
        responder.send(Ok(())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_scripted_prompt_defaults_to_no() {
        let mut prompt = ScriptedPrompt::answering([true]);
        assert!(prompt.confirm("first").await);
        assert!(!prompt.confirm("second").await);
        prompt.alert("done").await;

        assert_eq!(prompt.confirmations(), vec!["first", "second"]);
        assert_eq!(prompt.alerts(), vec!["done"]);
    }
}
