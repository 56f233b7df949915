//! Reviews are values owned by exactly one [`Product`](super::Product); they have no
//! identity of their own beyond the author.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: UserId,
    /// Display name of the author when the review was written.
    pub user_name: String,
    pub user_rating: u8,
    pub user_review: String,
    pub updated_at: DateTime<Utc>,
}

/// Rating and text as submitted, before validation.
///
/// The rating is kept as a JSON number so that `4.0` and `4.5` reach validation and
/// get the domain message instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub user_rating: Option<f64>,
    pub user_review: Option<String>,
}

impl ReviewDraft {
    pub fn new(user_rating: i64, user_review: impl Into<String>) -> Self {
        Self {
            user_rating: Some(user_rating as f64),
            user_review: Some(user_review.into()),
        }
    }
}

/// Response to a review create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review: Review,
    pub rating: f64,
    pub num_reviews: u32,
}
