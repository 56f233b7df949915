/// Represents a product in the catalog, together with the reviews it owns.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be stored by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`](crate::model::ProductCreate))
/// - Update parameters ([`ProductUpdate`](crate::model::ProductUpdate))
/// - Review actions ([`ProductAction`](crate::product_actor::actions::ProductAction))
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::review::Review;
use super::user::UserId;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub desc: String,
    pub price: f64,
    pub category: String,
    pub size: String,
    pub color: String,
    pub count_in_stock: u32,
    pub image: String,
    /// Mean of `reviews[..].user_rating`, `0` without reviews.
    pub rating: f64,
    /// Always `reviews.len()`.
    pub num_reviews: u32,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The review written by `user`, if any.
    pub fn review_by(&self, user: &UserId) -> Option<&Review> {
        self.reviews.iter().find(|r| &r.user_id == user)
    }

    /// Recomputes `rating` and `num_reviews` from `reviews`.
    ///
    /// Must run as the last step of every review mutation.
    pub fn recompute_aggregates(&mut self) {
        self.num_reviews = self.reviews.len() as u32;
        self.rating = if self.reviews.is_empty() {
            0.0
        } else {
            let total: u32 = self.reviews.iter().map(|r| u32::from(r.user_rating)).sum();
            f64::from(total) / self.reviews.len() as f64
        };
    }
}

/// Administrator payload for a new product.
///
/// Every field is optional on the wire so that a missing field is reported as an
/// invalid argument instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub count_in_stock: Option<u32>,
    /// Filename handed over by the upload layer.
    pub image: Option<String>,
}

/// Administrator patch for an existing product. Absent fields are left unchanged.
///
/// Reviews and the derived aggregates are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub count_in_stock: Option<u32>,
    pub image: Option<String>,
}
