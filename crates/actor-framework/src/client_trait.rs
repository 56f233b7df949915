//! # ActorClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default `get`,
//! `find` and `delete` methods built on top of a generic `ResourceClient`.
use crate::query::FindQuery;
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard store operations.
///
/// Implementors supply the inner [`ResourceClient`] and a mapping from
/// [`FrameworkError`] to their own error type.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Product> for ProductClient {
///     type Error = ProductError;
///
///     fn inner(&self) -> &ResourceClient<Product> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         match e.downcast_entity::<ProductError>() {
///             Ok(product_error) => product_error,
///             Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
///             Err(other) => ProductError::Store(other.to_string()),
///         }
///     }
/// }
///
/// // get(), find() and delete() are provided automatically.
/// let product = client.get(ProductId(1)).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `query`.
    #[tracing::instrument(skip(self))]
    async fn find(&self, query: FindQuery) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(query).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
