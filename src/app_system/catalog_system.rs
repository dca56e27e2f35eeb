use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::{RestClient, ScreenClient};
use crate::domain::Product;
use crate::error::ApiError;
use crate::screen_actor::{CatalogScreen, Prompt};

use super::Config;

/// Starts the resource and screen actors, wires them together and shuts them
/// down.
pub struct CatalogSystem {
    pub screen_client: ScreenClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Startup order: the resource actor first, then the screen that depends
    /// on it.
    #[instrument(name = "catalog_system", skip(config, prompt), fields(api_url = %config.api_url))]
    pub fn start(config: &Config, prompt: Box<dyn Prompt>) -> Result<Self, ApiError> {
        info!("Starting catalog system");

        let rest = RestClient::new(config.api_url.clone())?;
        let (resource_actor, product_client) = ResourceActor::<Product>::new(config.buffer_size, rest);
        let resource_handle = tokio::spawn(resource_actor.run());

        let (screen, screen_client) = CatalogScreen::new(config.buffer_size, product_client, prompt);
        let screen_handle = tokio::spawn(screen.run());

        info!("Catalog system started");
        Ok(Self {
            screen_client,
            handles: vec![screen_handle, resource_handle],
        })
    }

    /// Stops the screen; the resource actor follows once the screen drops its
    /// client.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system");

        let _ = self.screen_client.shutdown().await;
        drop(self.screen_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}
