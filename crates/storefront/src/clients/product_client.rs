//! # Product Client
//!
//! Provides a high-level API for the catalog. It wraps a `ResourceClient<Product>`,
//! performs the administrator capability check before touching the store, and maps
//! store failures into [`ProductError`].
use crate::filter::{ProductPredicates, SortKey};
use crate::model::{
    CurrentUser, Product, ProductCreate, ProductId, ProductUpdate, ReviewDraft, ReviewSummary,
    UserId,
};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    /// Entity errors come back as the `ProductError` they started as; a name collision
    /// is the duplicate-product conflict; everything else is a store failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ProductError>() {
            Ok(product_error) => product_error,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(FrameworkError::Conflict { field, .. }) if field == "name" => {
                ProductError::duplicate_name()
            }
            Err(FrameworkError::Conflict { field, value }) => {
                ProductError::Conflict(format!("{field} {value} already exists"))
            }
            Err(other) => ProductError::Store(other.to_string()),
        }
    }
}

fn require_admin(user: &CurrentUser, operation: &str) -> Result<(), ProductError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(ProductError::admin_only(operation))
    }
}

impl ProductClient {
    /// Lists the products matching every supplied predicate, ordered by `sort`.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        predicates: &ProductPredicates,
        sort: Option<SortKey>,
    ) -> Result<Vec<Product>, ProductError> {
        self.find(predicates.to_query(sort)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, params), fields(user_id = %user.id))]
    pub async fn create_product(
        &self,
        user: &CurrentUser,
        params: ProductCreate,
    ) -> Result<Product, ProductError> {
        require_admin(user, "create")?;
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, patch), fields(user_id = %user.id))]
    pub async fn update_product(
        &self,
        user: &CurrentUser,
        id: ProductId,
        patch: ProductUpdate,
    ) -> Result<Product, ProductError> {
        require_admin(user, "update")?;
        debug!(?patch, "Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Deletes by id.
    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn delete_product(
        &self,
        user: &CurrentUser,
        id: ProductId,
    ) -> Result<(), ProductError> {
        require_admin(user, "delete")?;
        self.delete(id).await
    }

    #[instrument(skip(self, author, draft), fields(user_id = %author.id))]
    pub async fn create_review(
        &self,
        id: ProductId,
        author: &CurrentUser,
        draft: ReviewDraft,
    ) -> Result<ReviewSummary, ProductError> {
        debug!("Sending request");
        let action = ProductAction::CreateReview {
            author: author.clone(),
            draft,
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CreateReview(summary) => Ok(summary),
            _ => unreachable!("CreateReview action must return CreateReview result"),
        }
    }

    #[instrument(skip(self, author, draft), fields(user_id = %author.id))]
    pub async fn update_review(
        &self,
        id: ProductId,
        author: &CurrentUser,
        draft: ReviewDraft,
    ) -> Result<ReviewSummary, ProductError> {
        debug!("Sending request");
        let action = ProductAction::UpdateReview {
            author: author.clone(),
            draft,
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::UpdateReview(summary) => Ok(summary),
            _ => unreachable!("UpdateReview action must return UpdateReview result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ProductId, user_id: &UserId) -> Result<(), ProductError> {
        debug!("Sending request");
        let action = ProductAction::DeleteReview {
            user_id: user_id.clone(),
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::DeleteReview(()) => Ok(()),
            _ => unreachable!("DeleteReview action must return DeleteReview result"),
        }
    }
}
