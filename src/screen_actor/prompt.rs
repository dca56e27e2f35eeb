use async_trait::async_trait;

/// Blocking user notifications raised by the screen.
#[async_trait]
pub trait Prompt: Send {
    /// Show a message and wait until the user has seen it.
    async fn alert(&mut self, message: &str);

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    async fn confirm(&mut self, message: &str) -> bool;
}

/// User-facing texts. Failures stay generic; details go to the log.
pub mod notices {
    pub const LOAD_FAILED: &str = "Failed to load products!";
    pub const CREATED: &str = "Product added successfully!";
    pub const UPDATED: &str = "Product updated successfully!";
    pub const SAVE_FAILED: &str = "Failed to save product!";
    pub const DELETED: &str = "Product deleted successfully!";
    pub const DELETE_FAILED: &str = "Failed to delete product!";
    pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this product?";
}
