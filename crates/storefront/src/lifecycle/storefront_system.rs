use crate::clients::ProductClient;
use crate::product_actor;
use tracing::{error, info};

/// The runtime orchestrator for the storefront.
///
/// `StorefrontSystem` owns the lifecycle of the product store:
/// - **Startup**: spawns the Product actor and hands out its client
/// - **Shutdown**: drops its client and waits for the actor to drain its mailbox
///
/// The client is the only way to reach the store. Clone it into whatever needs it
/// (the HTTP router state, tests); the actor stops once every clone is gone.
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(32);
/// let products = system.product_client.list_products(&predicates, None).await?;
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts the Product actor with a mailbox of `mailbox_capacity` requests.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(mailbox_capacity: usize) -> Self {
        let (actor, resource_client) = product_actor::new(mailbox_capacity);
        let product_client = ProductClient::new(resource_client);
        let handle = tokio::spawn(actor.run(()));

        info!(mailbox_capacity, "Storefront system started");
        Self {
            product_client,
            handles: vec![handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Requests already queued are still answered. Clones of the client held elsewhere
    /// keep the actor alive, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every actor shut down cleanly
    /// - `Err(String)` if an actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
