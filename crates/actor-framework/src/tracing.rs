//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate
//! for every store actor and client built on this framework.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` and `Shutdown` with the final collection size
//! - **Store Operations**: Create, Get, Find, FindOne, Update, Delete and custom Actions
//! - **Rejections**: unique-field conflicts and entity errors, at `warn`
//!
//! ## Usage
//!
//! ```bash
//! # Mutations only
//! RUST_LOG=info cargo run
//!
//! # Every request with its payload and query
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a review submission looks like:
//!
//! ```text
//! DEBUG create_review: Sending request id=product_1 user_id=u1
//! DEBUG Action entity_type="Product" id=product_1 action=CreateReview { .. }
//!  INFO Action applied entity_type="Product" id=product_1
//! ```
//!
//! When `RUST_LOG` is unset the filter falls back to `info`.

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. Call once, at process start.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already names the source
        .compact()
        .init();
}
