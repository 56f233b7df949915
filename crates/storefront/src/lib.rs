//! # Storefront
//!
//! The catalog backend of an e-commerce storefront: product listing with composable
//! filters and sorting, administrator product management, and per-user product reviews
//! with a maintained aggregate rating.
//!
//! - **[model]**: Plain data ([`Product`](model::Product), [`Review`](model::Review), [`CurrentUser`](model::CurrentUser)).
//! - **[product_actor]**: The Product store entity, its errors and the review actions.
//! - **[filter]**: The filter resolver that turns listing parameters into one store query.
//! - **[clients]**: [`ProductClient`](clients::ProductClient), the typed façade over the store.
//! - **[lifecycle]**: Starts and stops the store actor.
//! - **[http]**: The axum router.
//! - **[config]**: Environment configuration.

pub mod clients;
pub mod config;
pub mod filter;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
