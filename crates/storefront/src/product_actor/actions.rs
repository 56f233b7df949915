//! Custom actions for the Product actor.
//!
//! The review operations are actions rather than updates: each one reads the product's
//! review list, checks the author's state against it, mutates it and recomputes the
//! aggregates, and the store runs all of that as one step.
//!
//! See [`impl ActorEntity for Product`](crate::model::Product#impl-ActorEntity-for-Product)
//! for the implementation.

use crate::model::{CurrentUser, ReviewDraft, ReviewSummary, UserId};

/// Review operations on a single product.
///
/// Per product and author the review moves `NoReview -> Reviewed` on create,
/// `Reviewed -> Reviewed` on update and `Reviewed -> NoReview` on delete.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Adds the author's first review.
    ///
    /// # Errors
    /// `Conflict` if the author already reviewed the product, then `InvalidArgument`
    /// if the draft is incomplete or the rating is outside 1..=5.
    CreateReview {
        author: CurrentUser,
        draft: ReviewDraft,
    },
    /// Replaces the author's review with a fresh one at the end of the list.
    ///
    /// # Errors
    /// `Conflict` if the author has no review yet, then the same draft rules as create.
    UpdateReview {
        author: CurrentUser,
        draft: ReviewDraft,
    },
    /// Removes the author's review.
    ///
    /// # Errors
    /// `Conflict` if the author has no review.
    DeleteReview { user_id: UserId },
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    CreateReview(ReviewSummary),
    UpdateReview(ReviewSummary),
    DeleteReview(()),
}
