//! ActorEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] implementation that enables [`Product`] to be
//! stored by the generic [`actor_framework::ResourceActor`], including the validation of
//! administrator payloads and the review aggregator.
//!
//! See the trait implementation on [`Product`] for method documentation.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{
    CurrentUser, Product, ProductCreate, ProductId, ProductUpdate, Review, ReviewDraft,
    ReviewSummary,
};
use actor_framework::query::Value;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

/// Upload filename extensions accepted for product images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

const RATING_RANGE_MSG: &str = "Rating must be a whole number between 1 and 5";

const REQUIRED_FIELDS_MSG: &str =
    "Name, description, price, category, size, color, and stock count required";

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

    /// Validates the administrator payload and builds a product without reviews.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let (
            Some(name),
            Some(desc),
            Some(price),
            Some(category),
            Some(size),
            Some(color),
            Some(count_in_stock),
        ) = (
            present(params.name),
            present(params.desc),
            params.price,
            present(params.category),
            present(params.size),
            present(params.color),
            params.count_in_stock,
        )
        else {
            return Err(ProductError::invalid(REQUIRED_FIELDS_MSG));
        };
        check_price(price)?;
        let image =
            present(params.image).ok_or_else(|| ProductError::invalid("Image required"))?;
        check_image(&image)?;

        let now = Utc::now();
        Ok(Self {
            id,
            name,
            desc,
            price,
            category,
            size,
            color,
            count_in_stock,
            image,
            rating: 0.0,
            num_reviews: 0,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Exposes the filterable and sortable fields.
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "category" => Some(Value::from(self.category.as_str())),
            "size" => Some(Value::from(self.size.as_str())),
            "color" => Some(Value::from(self.color.as_str())),
            "price" => Some(Value::from(self.price)),
            "rating" => Some(Value::from(self.rating)),
            _ => None,
        }
    }

    /// Applies an administrator patch.
    ///
    /// # Fields Updated
    /// Every present field of [`ProductUpdate`]; text fields are trimmed and must not be
    /// blank, the price must be a finite non-negative number and the image must have an
    /// accepted extension.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        let text_fields = [
            ("name", update.name, &mut self.name),
            ("desc", update.desc, &mut self.desc),
            ("category", update.category, &mut self.category),
            ("size", update.size, &mut self.size),
            ("color", update.color, &mut self.color),
        ];
        for (label, value, slot) in text_fields {
            if let Some(value) = value {
                *slot = present(Some(value))
                    .ok_or_else(|| ProductError::invalid(format!("{label} must not be empty")))?;
            }
        }
        if let Some(price) = update.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(count) = update.count_in_stock {
            self.count_in_stock = count;
        }
        if let Some(image) = update.image {
            let image = image.trim().to_string();
            check_image(&image)?;
            self.image = image;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles the review actions.
    ///
    /// # Actions
    /// - `CreateReview`: appends the author's first review
    /// - `UpdateReview`: drops the author's review and appends the replacement
    /// - `DeleteReview`: drops the author's review
    ///
    /// Every branch ends by recomputing `rating` and `num_reviews`.
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CreateReview { author, draft } => {
                if self.review_by(&author.id).is_some() {
                    return Err(ProductError::duplicate_review());
                }
                let (rating, text) = validate_draft(draft)?;
                let summary = append_review(self, &author, rating, text);
                Ok(ProductActionResult::CreateReview(summary))
            }
            ProductAction::UpdateReview { author, draft } => {
                if self.review_by(&author.id).is_none() {
                    return Err(ProductError::missing_review());
                }
                let (rating, text) = validate_draft(draft)?;
                self.reviews.retain(|r| r.user_id != author.id);
                let summary = append_review(self, &author, rating, text);
                Ok(ProductActionResult::UpdateReview(summary))
            }
            ProductAction::DeleteReview { user_id } => {
                if self.review_by(&user_id).is_none() {
                    return Err(ProductError::missing_review());
                }
                self.reviews.retain(|r| r.user_id != user_id);
                self.recompute_aggregates();
                self.updated_at = Utc::now();
                Ok(ProductActionResult::DeleteReview(()))
            }
        }
    }
}

/// Trimmed text, or `None` when absent or blank.
fn present(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn check_price(price: f64) -> Result<(), ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ProductError::invalid("Price must be a non-negative number"))
    }
}

fn check_image(filename: &str) -> Result<(), ProductError> {
    let accepted = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
    if accepted {
        Ok(())
    } else {
        Err(ProductError::invalid(
            "The only accepted image files are .png, .jpg, .jpeg, and .webp",
        ))
    }
}

/// Checks presence first, then that the rating is a whole number in 1..=5.
fn validate_draft(draft: ReviewDraft) -> Result<(u8, String), ProductError> {
    let (Some(rating), Some(text)) = (draft.user_rating, present(draft.user_review)) else {
        return Err(ProductError::invalid("Rating and review are required"));
    };
    if rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
        return Err(ProductError::invalid(RATING_RANGE_MSG));
    }
    Ok((rating as u8, text))
}

fn append_review(
    product: &mut Product,
    author: &CurrentUser,
    rating: u8,
    text: String,
) -> ReviewSummary {
    let now = Utc::now();
    let review = Review {
        user_id: author.id.clone(),
        user_name: author.display_name(),
        user_rating: rating,
        user_review: text,
        updated_at: now,
    };
    product.reviews.push(review.clone());
    product.recompute_aggregates();
    product.updated_at = now;
    ReviewSummary {
        review,
        rating: product.rating,
        num_reviews: product.num_reviews,
    }
}
