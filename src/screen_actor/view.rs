use crate::domain::{Product, ProductDraft};

/// Which submission the open form will make.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    /// The code is locked to the row being edited.
    Edit { code: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub mode: FormMode,
    pub draft: ProductDraft,
}

impl FormView {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ProductDraft::default(),
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit {
                code: product.code.clone(),
            },
            draft: ProductDraft::from(product),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }
}

/// Snapshot of everything the screen shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenView {
    pub products: Vec<Product>,
    pub form: Option<FormView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(String),
    Updated(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(String),
    Cancelled,
}
