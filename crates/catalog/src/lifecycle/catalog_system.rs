use crate::config::CatalogConfig;
use crate::facades::{ProductsFacade, UsersFacade};
use crate::hashing::{BcryptHasher, PasswordHasher};
use crate::{product_store, user_store};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping both store actors
/// - **Dependency Wiring**: Handing each facade its store client, and the users facade its
///   password hasher
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new(&CatalogConfig::load()?);
///
/// let product = system.products.create(request).await?;
/// let page = system.products.find_all(10, 0).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Facade over the Product store
    pub products: ProductsFacade,

    /// Facade over the User store
    pub users: UsersFacade,

    /// Task handles for both store actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Starts both stores with a bcrypt hasher at the configured cost.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_hasher(config, Arc::new(BcryptHasher::new(config.bcrypt_cost)))
    }

    /// Starts both stores with the given password hasher.
    pub fn with_hasher(config: &CatalogConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        let (product_actor, product_client) = product_store::new(config.buffer_size);
        let (user_actor, user_client) = user_store::new(config.buffer_size);

        let product_handle = tokio::spawn(product_actor.run());
        let user_handle = tokio::spawn(user_actor.run());

        Self {
            products: ProductsFacade::new(product_client),
            users: UsersFacade::new(user_client, hasher),
            handles: vec![product_handle, user_handle],
        }
    }

    /// Gracefully shuts down both stores.
    ///
    /// Dropping the facades closes the request channels; each actor drains and exits. Clones
    /// of a facade handed out elsewhere keep their store alive until they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both actors shut down cleanly
    /// - `Err(String)` if an actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");

        drop(self.products);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
