//! # Product Actor
//!
//! This module implements the Product store: the catalog documents, the administrator
//! payload rules, and the review aggregator.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for the review operations
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Review Aggregator
//!
//! Reviews change only through actions. The actor runs one action at a time against a
//! working copy of the product, so a review operation is a single read-modify-write and
//! concurrent submissions for one product cannot both pass the one-review-per-user check:
//!
//! ```rust,ignore
//! let summary = product_client.create_review(product_id, &user, draft).await?;
//! assert_eq!(summary.num_reviews, 1);
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::{CurrentUser, ProductCreate, ReviewDraft};
//! use storefront::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let admin = CurrentUser::new("u0", "Grace", "Hopper").admin();
//!     let params = ProductCreate {
//!         name: Some("Canvas Tote".into()),
//!         desc: Some("Heavy canvas".into()),
//!         price: Some(18.0),
//!         category: Some("bags".into()),
//!         size: Some("One Size".into()),
//!         color: Some("Natural".into()),
//!         count_in_stock: Some(40),
//!         image: Some("tote.png".into()),
//!     };
//!     let product = client.create_product(&admin, params).await?;
//!
//!     let shopper = CurrentUser::new("u1", "Alan", "Turing");
//!     let summary = client
//!         .create_review(product.id, &shopper, ReviewDraft::new(5, "Holds everything"))
//!         .await?;
//!     assert_eq!(summary.rating, 5.0);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
///
/// `buffer_size` is the mailbox capacity; senders wait while it is full.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
