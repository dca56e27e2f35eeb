use tokio::sync::oneshot;

use crate::domain::{FormField, ProductDraft};
use crate::error::ScreenError;
use crate::screen_actor::{DeleteOutcome, ScreenView, SubmitOutcome};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// UI events for the catalog screen. Each variant carries its parameters and
/// a oneshot channel for the outcome.
#[derive(Debug)]
pub enum ScreenRequest {
    Mount {
        respond_to: ServiceResponse<usize, ScreenError>,
    },
    OpenCreate {
        respond_to: ServiceResponse<(), ScreenError>,
    },
    Edit {
        code: String,
        respond_to: ServiceResponse<ProductDraft, ScreenError>,
    },
    SetField {
        field: FormField,
        value: String,
        respond_to: ServiceResponse<(), ScreenError>,
    },
    Submit {
        respond_to: ServiceResponse<SubmitOutcome, ScreenError>,
    },
    Delete {
        code: String,
        respond_to: ServiceResponse<DeleteOutcome, ScreenError>,
    },
    CloseForm {
        respond_to: ServiceResponse<(), ScreenError>,
    },
    View {
        respond_to: ServiceResponse<ScreenView, ScreenError>,
    },
    Shutdown,
}
