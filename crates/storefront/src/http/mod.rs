//! # HTTP Boundary
//!
//! An axum [`Router`] over a [`ProductClient`]. Handlers translate requests into client
//! calls and [`ProductError`](crate::product_actor::ProductError)s into status codes:
//!
//! | Error | Status |
//! |---|---|
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | `InvalidArgument`, malformed body | 400 |
//! | `Forbidden` | 403 |
//! | no acting user | 401 |
//! | `Store` | 500 |

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tokio::signal::{self, ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod auth;
pub mod error;
pub mod routes;

use crate::clients::ProductClient;
use routes::*;

pub fn router(client: ProductClient, cors_max_age: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(auth::USER_ID_HEADER),
            HeaderName::from_static(auth::FIRST_NAME_HEADER),
            HeaderName::from_static(auth::LAST_NAME_HEADER),
            HeaderName::from_static(auth::ADMIN_HEADER),
        ])
        .max_age(cors_max_age);

    Router::new()
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/products/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route(
            "/products/:id/reviews",
            post(create_review_handler)
                .put(update_review_handler)
                .delete(delete_review_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(client)
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
