//! Typed façades over the generic store clients.

pub mod product_client;

pub use product_client::ProductClient;
