use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use storefront::http::router;
use storefront::lifecycle::StorefrontSystem;
use tower::ServiceExt;

enum As {
    Nobody,
    Admin,
    Shopper(&'static str),
}

fn request(method: &str, uri: &str, who: As, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    match who {
        As::Nobody => {}
        As::Admin => {
            builder = builder
                .header("x-user-id", "admin")
                .header("x-user-first-name", "Grace")
                .header("x-user-last-name", "Hopper")
                .header("x-user-admin", "true");
        }
        As::Shopper(id) => {
            builder = builder
                .header("x-user-id", id)
                .header("x-user-first-name", "Ada")
                .header("x-user-last-name", "Lovelace");
        }
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    who: As,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send(app, request(method, uri, who, body)).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn tee(name: &str, category: &str, price: f64) -> Option<Value> {
    Some(json!({
        "name": name,
        "desc": "cotton",
        "price": price,
        "category": category,
        "size": "M",
        "color": "Blue",
        "countInStock": 3,
        "image": "tee.webp"
    }))
}

fn review(rating: i64, text: &str) -> Option<Value> {
    Some(json!({ "userRating": rating, "userReview": text }))
}

fn app() -> (StorefrontSystem, Router) {
    let system = StorefrontSystem::new(32);
    let app = router(system.product_client.clone(), Duration::from_secs(60));
    (system, app)
}

#[tokio::test]
async fn test_product_routes() {
    let (_system, app) = app();

    let (status, body) = call(&app, "POST", "/products", As::Admin, tee("Tee", "shirts", 20.0)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["numReviews"], 0);
    assert_eq!(body["rating"], 0.0);
    let product = format!("/products/{}", body["id"].as_u64().unwrap());

    let (status, body) = call(&app, "POST", "/products", As::Admin, tee("Tee", "shirts", 5.0)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!("Product already exists"));

    let (status, _) = call(&app, "POST", "/products", As::Shopper("u1"), tee("Hat", "hats", 5.0)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "POST", "/products", As::Nobody, tee("Hat", "hats", 5.0)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, "POST", "/products", As::Admin, Some(json!({ "name": "Hat" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri("/products")
        .header("x-user-id", "admin")
        .header("x-user-admin", "true")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, "GET", &product, As::Nobody, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tee");

    let (status, _) = call(&app, "GET", "/products/404", As::Nobody, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "GET", "/products/not-an-id", As::Nobody, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let patch = json!({ "price": 18.5, "countInStock": 0 });
    let (status, body) = call(&app, "PUT", &product, As::Admin, Some(patch.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], 18.5);
    assert_eq!(body["countInStock"], 0);

    let (status, _) = call(&app, "PUT", &product, As::Shopper("u1"), Some(patch)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "DELETE", &product, As::Shopper("u1"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, "DELETE", &product, As::Admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Deleted product"));

    let (status, _) = call(&app, "DELETE", &product, As::Admin, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_query_parameters() {
    let (_system, app) = app();
    let rows = [("A", "shirts", 30.0), ("B", "hats", 10.0), ("C", "shirts", 20.0)];
    for (name, category, price) in rows {
        let (status, _) = call(&app, "POST", "/products", As::Admin, tee(name, category, price)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let names = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = call(&app, "GET", "/products", As::Nobody, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["A", "B", "C"]);

    let uri = "/products?category=shirts&filter=Price%20(Lowest%20to%20Highest)";
    let (_, body) = call(&app, "GET", uri, As::Nobody, None).await;
    assert_eq!(names(&body), vec!["C", "A"]);

    let (_, body) = call(&app, "GET", "/products?filter=price-desc&size=", As::Nobody, None).await;
    assert_eq!(names(&body), vec!["A", "C", "B"]);

    let uri = "/products?color=Red&filter=whatever";
    let (_, body) = call(&app, "GET", uri, As::Nobody, None).await;
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_review_routes() {
    let (_system, app) = app();
    let (_, body) = call(&app, "POST", "/products", As::Admin, tee("Tee", "shirts", 20.0)).await;
    let reviews = format!("/products/{}/reviews", body["id"]);

    let (status, _) = call(&app, "POST", &reviews, As::Nobody, review(4, "nice")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(&app, "POST", &reviews, As::Shopper("u1"), review(4, "nice")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"], 4.0);
    assert_eq!(body["numReviews"], 1);
    assert_eq!(body["review"]["userName"], "Ada Lovelace");
    assert_eq!(body["review"]["userId"], "u1");

    let (status, body) = call(&app, "POST", &reviews, As::Shopper("u1"), review(2, "again")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!("You have already written a review for this product"));

    let whole = Some(json!({ "userRating": 3.0, "userReview": "fine" }));
    let (status, body) = call(&app, "POST", &reviews, As::Shopper("u3"), whole).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["review"]["userRating"], 3);
    let (status, _) = call(&app, "DELETE", &reviews, As::Shopper("u3"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "POST", &reviews, As::Shopper("u2"), review(7, "wow")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let no_text = Some(json!({ "userRating": 3 }));
    let (status, _) = call(&app, "POST", &reviews, As::Shopper("u2"), no_text).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let half = Some(json!({ "userRating": 4.5, "userReview": "almost" }));
    let (status, body) = call(&app, "PUT", &reviews, As::Shopper("u1"), half).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!("Rating must be a whole number between 1 and 5"));
    let (_, body) = call(&app, "GET", &reviews.replace("/reviews", ""), As::Nobody, None).await;
    assert_eq!(body["rating"], 4.0);
    assert_eq!(body["reviews"][0]["userReview"], "nice");

    let (status, body) = call(&app, "PUT", &reviews, As::Shopper("u1"), review(2, "faded")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"], 2.0);
    assert_eq!(body["review"]["userReview"], "faded");

    let (status, _) = call(&app, "PUT", &reviews, As::Shopper("u2"), review(2, "x")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, "DELETE", &reviews, As::Shopper("u1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Deleted user's review"));

    let (status, _) = call(&app, "DELETE", &reviews, As::Shopper("u1"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let invalid = Some(json!({ "userRating": 9 }));
    let uri = "/products/999/reviews";
    let (status, _) = call(&app, "POST", uri, As::Shopper("u1"), invalid).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "PUT", uri, As::Shopper("u1"), review(3, "ok")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", uri, As::Shopper("u1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
