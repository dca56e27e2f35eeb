use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::prompt::{notices, Prompt};
use super::view::{DeleteOutcome, FormMode, FormView, ScreenView, SubmitOutcome};
use crate::actor_framework::ResourceClient;
use crate::clients::ScreenClient;
use crate::domain::{FormField, Product, ProductDraft};
use crate::error::ScreenError;
use crate::messages::{ScreenRequest, ServiceResponse};

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

/// The catalog view-model. Owns the rendered product list and the form draft
/// and turns UI events into collection requests.
///
/// The list is only ever replaced wholesale by a successful fetch; mutations
/// never patch it locally.
pub struct CatalogScreen {
    receiver: mpsc::Receiver<ScreenRequest>,
    products: ResourceClient<Product>,
    prompt: Box<dyn Prompt>,
    rows: Vec<Product>,
    form: Option<FormView>,
}

impl CatalogScreen {
    pub fn new(
        buffer_size: usize,
        products: ResourceClient<Product>,
        prompt: Box<dyn Prompt>,
    ) -> (Self, ScreenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let screen = Self {
            receiver,
            products,
            prompt,
            rows: Vec::new(),
            form: None,
        };
        (screen, ScreenClient::new(sender))
    }

    #[instrument(name = "catalog_screen", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogScreen starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ScreenRequest::Mount { respond_to } => {
                    let _ = respond_to.send(self.refresh().await);
                }
                ScreenRequest::OpenCreate { respond_to } => {
                    self.handle_open_create(respond_to);
                }
                ScreenRequest::Edit { code, respond_to } => {
                    self.handle_edit(code, respond_to);
                }
                ScreenRequest::SetField {
                    field,
                    value,
                    respond_to,
                } => {
                    self.handle_set_field(field, value, respond_to);
                }
                ScreenRequest::Submit { respond_to } => {
                    self.handle_submit(respond_to).await;
                }
                ScreenRequest::Delete { code, respond_to } => {
                    self.handle_delete(code, respond_to).await;
                }
                ScreenRequest::CloseForm { respond_to } => {
                    self.close_form();
                    let _ = respond_to.send(Ok(()));
                }
                ScreenRequest::View { respond_to } => {
                    let _ = respond_to.send(Ok(ScreenView {
                        products: self.rows.clone(),
                        form: self.form.clone(),
                    }));
                }
                ScreenRequest::Shutdown => {
                    info!("CatalogScreen shutting down");
                    break;
                }
            }
        }

        info!("CatalogScreen stopped");
    }

    /// Replaces the list with the server's. On failure the last successful
    /// list stays on screen.
    #[instrument(skip(self))]
    async fn refresh(&mut self) -> Result<usize, ScreenError> {
        debug!("Fetching product list");
        match self.products.list().await {
            Ok(rows) => {
                self.rows = rows;
                info!(product_count = self.rows.len(), "Product list refreshed");
                Ok(self.rows.len())
            }
            Err(e) => {
                error!(error = %e, "Product list fetch failed");
                self.prompt.alert(notices::LOAD_FAILED).await;
                Err(e.into())
            }
        }
    }

    fn handle_open_create(&mut self, respond_to: ServiceResponse<(), ScreenError>) {
        debug!("Opening create form");
        self.form = Some(FormView::create());
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(code = %code), skip(self, respond_to))]
    fn handle_edit(&mut self, code: String, respond_to: ServiceResponse<ProductDraft, ScreenError>) {
        let Some(product) = self.rows.iter().find(|p| p.code == code) else {
            warn!("Edit requested for a product that is not listed");
            send_error!(respond_to, ScreenError::NotListed(code));
        };

        let form = FormView::edit(product);
        let draft = form.draft.clone();
        self.form = Some(form);
        info!(product_name = %draft.name, "Opened edit form");
        let _ = respond_to.send(Ok(draft));
    }

    #[instrument(skip(self, value, respond_to))]
    fn handle_set_field(
        &mut self,
        field: FormField,
        value: String,
        respond_to: ServiceResponse<(), ScreenError>,
    ) {
        let Some(form) = self.form.as_mut() else {
            send_error!(respond_to, ScreenError::FormClosed);
        };
        if field == FormField::Code && form.is_edit() {
            send_error!(respond_to, ScreenError::CodeLocked);
        }
        form.draft.set(field, value);
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_submit(&mut self, respond_to: ServiceResponse<SubmitOutcome, ScreenError>) {
        let Some(form) = self.form.clone() else {
            send_error!(respond_to, ScreenError::FormClosed);
        };

        let product = match form.draft.validate(!form.is_edit()) {
            Ok(product) => product,
            Err(e) => {
                warn!(error = %e, "Form input rejected");
                self.prompt.alert(&e.to_string()).await;
                send_error!(respond_to, e.into());
            }
        };

        let (result, outcome, success_notice) = match form.mode {
            FormMode::Create => {
                let code = product.code.clone();
                info!(code = %code, "Creating product");
                (
                    self.products.create(product).await,
                    SubmitOutcome::Created(code),
                    notices::CREATED,
                )
            }
            FormMode::Edit { code } => {
                info!(code = %code, "Updating product");
                let product = Product {
                    code: code.clone(),
                    ..product
                };
                (
                    self.products.update(code.clone(), product).await,
                    SubmitOutcome::Updated(code),
                    notices::UPDATED,
                )
            }
        };

        if let Err(e) = result {
            error!(error = %e, "Saving product failed");
            self.prompt.alert(notices::SAVE_FAILED).await;
            send_error!(respond_to, e.into());
        }

        self.prompt.alert(success_notice).await;
        self.close_form();
        // A failed refresh is alerted on its own; the save itself stands.
        let _ = self.refresh().await;
        let _ = respond_to.send(Ok(outcome));
    }

    #[instrument(fields(code = %code), skip(self, respond_to))]
    async fn handle_delete(&mut self, code: String, respond_to: ServiceResponse<DeleteOutcome, ScreenError>) {
        if !self.prompt.confirm(notices::CONFIRM_DELETE).await {
            info!("Deletion declined");
            let _ = respond_to.send(Ok(DeleteOutcome::Cancelled));
            return;
        }

        if let Err(e) = self.products.delete(code.clone()).await {
            error!(error = %e, "Deleting product failed");
            self.prompt.alert(notices::DELETE_FAILED).await;
            send_error!(respond_to, e.into());
        }

        info!("Product deleted");
        self.prompt.alert(notices::DELETED).await;
        let _ = self.refresh().await;
        let _ = respond_to.send(Ok(DeleteOutcome::Deleted(code)));
    }

    fn close_form(&mut self) {
        if self.form.take().is_some() {
            debug!("Form closed and draft reset");
        }
    }
}
