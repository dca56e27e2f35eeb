use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{FormField, ProductDraft};
use crate::error::ScreenError;
use crate::messages::ScreenRequest;
use crate::screen_actor::{DeleteOutcome, ScreenView, SubmitOutcome};

/// Handle for sending UI events to the catalog screen.
#[derive(Clone)]
pub struct ScreenClient {
    sender: mpsc::Sender<ScreenRequest>,
}

impl ScreenClient {
    pub fn new(sender: mpsc::Sender<ScreenRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ScreenError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ScreenRequest::Shutdown)
            .await
            .map_err(|e| ScreenError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(ScreenClient => fn mount() -> usize as ScreenRequest::Mount, Error = ScreenError);
client_method!(ScreenClient => fn open_create() -> () as ScreenRequest::OpenCreate, Error = ScreenError);
client_method!(ScreenClient => fn edit(code: String) -> ProductDraft as ScreenRequest::Edit, Error = ScreenError);
client_method!(ScreenClient => fn set_field(field: FormField, value: String) -> () as ScreenRequest::SetField, Error = ScreenError);
client_method!(ScreenClient => fn submit() -> SubmitOutcome as ScreenRequest::Submit, Error = ScreenError);
client_method!(ScreenClient => fn delete(code: String) -> DeleteOutcome as ScreenRequest::Delete, Error = ScreenError);
client_method!(ScreenClient => fn close_form() -> () as ScreenRequest::CloseForm, Error = ScreenError);
client_method!(ScreenClient => fn view() -> ScreenView as ScreenRequest::View, Error = ScreenError);
