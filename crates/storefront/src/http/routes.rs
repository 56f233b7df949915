use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::error::ApiError;
use crate::clients::ProductClient;
use crate::filter::ListProductsParams;
use crate::model::{
    CurrentUser, Product, ProductCreate, ProductId, ProductUpdate, ReviewDraft, ReviewSummary,
};
use crate::product_actor::ProductError;

type Created<T> = (StatusCode, Json<T>);

/// Ids that cannot name a product are simply not found.
fn product_id(raw: &str) -> Result<ProductId, ProductError> {
    raw.parse::<u32>()
        .map(ProductId)
        .map_err(|_| ProductError::NotFound(raw.to_string()))
}

pub async fn list_products_handler(
    State(client): State<ProductClient>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let (predicates, sort) = params.into_parts();
    Ok(Json(client.list_products(&predicates, sort).await?))
}

pub async fn get_product_handler(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(client.get_product(product_id(&id)?).await?))
}

pub async fn create_product_handler(
    State(client): State<ProductClient>,
    user: CurrentUser,
    payload: Result<Json<ProductCreate>, JsonRejection>,
) -> Result<Created<Product>, ApiError> {
    let Json(params) = payload?;
    let product = client.create_product(&user, params).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product_handler(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    user: CurrentUser,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Created<Product>, ApiError> {
    let Json(patch) = payload?;
    let product = client.update_product(&user, product_id(&id)?, patch).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn delete_product_handler(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Json<&'static str>, ApiError> {
    client.delete_product(&user, product_id(&id)?).await?;
    Ok(Json("Deleted product"))
}

pub async fn create_review_handler(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    user: CurrentUser,
    payload: Result<Json<ReviewDraft>, JsonRejection>,
) -> Result<Created<ReviewSummary>, ApiError> {
    let Json(draft) = payload?;
    let summary = client.create_review(product_id(&id)?, &user, draft).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn update_review_handler(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    user: CurrentUser,
    payload: Result<Json<ReviewDraft>, JsonRejection>,
) -> Result<Created<ReviewSummary>, ApiError> {
    let Json(draft) = payload?;
    let summary = client.update_review(product_id(&id)?, &user, draft).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn delete_review_handler(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Json<&'static str>, ApiError> {
    client.delete_review(product_id(&id)?, &user.id).await?;
    Ok(Json("Deleted user's review"))
}
