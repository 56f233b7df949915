use std::collections::HashSet;

use storefront::clients::ProductClient;
use storefront::filter::{ProductPredicates, SortKey};
use storefront::lifecycle::StorefrontSystem;
use storefront::model::{
    CurrentUser, Product, ProductCreate, ProductId, ProductUpdate, ReviewDraft, UserId,
};
use storefront::product_actor::ProductError;

fn admin() -> CurrentUser {
    CurrentUser::new("admin", "Grace", "Hopper").admin()
}

fn shopper(n: usize) -> CurrentUser {
    CurrentUser::new(format!("user_{n}"), "Shopper", n.to_string())
}

fn listing(name: &str, category: &str, size: &str, color: &str, price: f64) -> ProductCreate {
    ProductCreate {
        name: Some(name.into()),
        desc: Some(format!("{name} description")),
        price: Some(price),
        category: Some(category.into()),
        size: Some(size.into()),
        color: Some(color.into()),
        count_in_stock: Some(5),
        image: Some(format!("{}.png", name.to_lowercase().replace(' ', "-"))),
    }
}

/// Eight products covering every category/size/color combination, with tied prices.
async fn seed(client: &ProductClient) -> Vec<Product> {
    let rows = [
        ("Red Tee S", "shirts", "S", "Red", 20.0),
        ("Blue Tee S", "shirts", "S", "Blue", 15.0),
        ("Red Tee M", "shirts", "M", "Red", 20.0),
        ("Blue Tee M", "shirts", "M", "Blue", 25.0),
        ("Red Cap S", "hats", "S", "Red", 10.0),
        ("Blue Cap S", "hats", "S", "Blue", 15.0),
        ("Red Cap M", "hats", "M", "Red", 30.0),
        ("Blue Cap M", "hats", "M", "Blue", 10.0),
    ];
    let mut created = Vec::new();
    for (name, category, size, color, price) in rows {
        let product = client
            .create_product(&admin(), listing(name, category, size, color, price))
            .await
            .unwrap();
        created.push(product);
    }
    created
}

/// Gives products distinct and tied ratings.
async fn rate(client: &ProductClient, products: &[Product]) {
    let ratings = [3, 5, 1, 3, 4, 2, 5, 1];
    for (i, (product, rating)) in products.iter().zip(ratings).enumerate() {
        client
            .create_review(product.id, &shopper(i), ReviewDraft::new(rating, "ok"))
            .await
            .unwrap();
    }
}

fn expected(
    all: &[Product],
    predicates: &ProductPredicates,
    sort: Option<SortKey>,
) -> Vec<ProductId> {
    let matches = |want: &Option<String>, have: &str| want.as_deref().map_or(true, |w| w == have);
    let mut hits: Vec<&Product> = all
        .iter()
        .filter(|p| {
            matches(&predicates.category, &p.category)
                && matches(&predicates.size, &p.size)
                && matches(&predicates.color, &p.color)
        })
        .collect();
    if let Some(key) = sort {
        hits.sort_by(|a, b| {
            let ord = match key {
                SortKey::PriceAsc | SortKey::PriceDesc => a.price.total_cmp(&b.price),
                SortKey::RatingAsc | SortKey::RatingDesc => a.rating.total_cmp(&b.rating),
            };
            match key {
                SortKey::PriceDesc | SortKey::RatingDesc => ord.reverse(),
                _ => ord,
            }
        });
    }
    hits.into_iter().map(|p| p.id).collect()
}

fn ids(products: &[Product]) -> Vec<ProductId> {
    products.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_every_predicate_subset_with_every_sort() {
    let system = StorefrontSystem::new(32);
    let client = system.product_client.clone();
    let seeded = seed(&client).await;
    rate(&client, &seeded).await;

    let all = client
        .list_products(&ProductPredicates::default(), None)
        .await
        .unwrap();
    assert_eq!(ids(&all), ids(&seeded));

    let mut sorts = vec![None];
    sorts.extend(SortKey::ALL.map(Some));

    for category in [None, Some("shirts"), Some("shoes")] {
        for size in [None, Some("M")] {
            for color in [None, Some("Blue")] {
                let predicates = ProductPredicates {
                    category: category.map(String::from),
                    size: size.map(String::from),
                    color: color.map(String::from),
                };
                for sort in &sorts {
                    let got = client.list_products(&predicates, *sort).await.unwrap();
                    assert_eq!(
                        ids(&got),
                        expected(&all, &predicates, *sort),
                        "predicates={predicates:?} sort={sort:?}"
                    );
                }
            }
        }
    }

    drop(client);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_listing_is_idempotent_without_writes() {
    let system = StorefrontSystem::new(32);
    let client = &system.product_client;
    seed(client).await;

    let first = client
        .list_products(&ProductPredicates::default(), None)
        .await
        .unwrap();
    let second = client
        .list_products(&ProductPredicates::default(), None)
        .await
        .unwrap();
    assert_eq!(first, second);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_review_scenarios_through_the_store() {
    let system = StorefrontSystem::new(32);
    let client = &system.product_client;
    let product = client
        .create_product(&admin(), listing("Tote", "bags", "One Size", "Natural", 18.0))
        .await
        .unwrap();
    let (u1, u2, u3) = (shopper(1), shopper(2), shopper(3));

    let a = client
        .create_review(product.id, &u1, ReviewDraft::new(4, "good"))
        .await
        .unwrap();
    assert_eq!((a.rating, a.num_reviews), (4.0, 1));

    client
        .create_review(product.id, &u2, ReviewDraft::new(2, "meh"))
        .await
        .unwrap();
    let b = client
        .update_review(product.id, &u1, ReviewDraft::new(5, "great"))
        .await
        .unwrap();
    assert_eq!((b.rating, b.num_reviews), (3.5, 2));

    client.delete_review(product.id, &u2.id).await.unwrap();
    let stored = client.get_product(product.id).await.unwrap();
    assert_eq!((stored.rating, stored.num_reviews), (5.0, 1));

    let d = client.delete_review(product.id, &u3.id).await.unwrap_err();
    assert_eq!(d, ProductError::missing_review());

    let before = client.get_product(product.id).await.unwrap();
    let e = client
        .create_review(product.id, &u1, ReviewDraft::new(1, "again"))
        .await
        .unwrap_err();
    assert_eq!(e, ProductError::duplicate_review());
    assert_eq!(client.get_product(product.id).await.unwrap(), before);

    let missing = client
        .create_review(ProductId(999), &u1, ReviewDraft::new(0, ""))
        .await
        .unwrap_err();
    assert!(matches!(missing, ProductError::NotFound(_)));

    let missing = client
        .update_review(ProductId(999), &u1, ReviewDraft::new(3, "ok"))
        .await
        .unwrap_err();
    assert_eq!(missing, ProductError::NotFound("product_999".into()));
    let missing = client
        .delete_review(ProductId(999), &u1.id)
        .await
        .unwrap_err();
    assert_eq!(missing, ProductError::NotFound("product_999".into()));

    // A rejected update keeps u1's review and the aggregates.
    let before = client.get_product(product.id).await.unwrap();
    for draft in [ReviewDraft::new(0, "zero"), ReviewDraft::new(4, "  ")] {
        let err = client
            .update_review(product.id, &u1, draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::InvalidArgument(_)));
    }
    assert_eq!(client.get_product(product.id).await.unwrap(), before);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_reviews_by_one_user_keep_one() {
    let system = StorefrontSystem::new(8);
    let client = system.product_client.clone();
    let product = client
        .create_product(&admin(), listing("Scarf", "accessories", "One Size", "Grey", 12.0))
        .await
        .unwrap();
    let id = product.id;

    let tasks: Vec<_> = (0..25)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let rating = (i % 5) as i64 + 1;
                if i % 2 == 0 {
                    client
                        .create_review(id, &shopper(0), ReviewDraft::new(rating, "mine"))
                        .await
                        .map(|_| ())
                } else {
                    client.delete_review(id, &UserId::from("user_0")).await
                }
            })
        })
        .collect();
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) | Err(ProductError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error {other}"),
        }
    }

    let stored = client.get_product(id).await.unwrap();
    assert!(stored.reviews.len() <= 1);
    assert_eq!(stored.num_reviews as usize, stored.reviews.len());
    let authors: HashSet<_> = stored.reviews.iter().map(|r| &r.user_id).collect();
    assert_eq!(authors.len(), stored.reviews.len());

    drop(client);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_reviews_by_many_users_all_land() {
    let system = StorefrontSystem::new(4);
    let client = system.product_client.clone();
    let product = client
        .create_product(&admin(), listing("Mug", "kitchen", "12oz", "White", 9.0))
        .await
        .unwrap();
    let id = product.id;

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let rating = if i % 2 == 0 { 5 } else { 1 };
                client
                    .create_review(id, &shopper(i), ReviewDraft::new(rating, "hot"))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = client.get_product(id).await.unwrap();
    assert_eq!(stored.num_reviews, 40);
    assert_eq!(stored.rating, 3.0);

    drop(client);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_product_administration() {
    let system = StorefrontSystem::new(32);
    let client = system.product_client.clone();

    let tote = client
        .create_product(&admin(), listing("Tote", "bags", "One Size", "Natural", 18.0))
        .await
        .unwrap();
    let duffel = client
        .create_product(&admin(), listing("Duffel", "bags", "L", "Black", 60.0))
        .await
        .unwrap();

    let dup = client
        .create_product(&admin(), listing("Tote", "bags", "S", "Red", 1.0))
        .await
        .unwrap_err();
    assert_eq!(dup, ProductError::duplicate_name());

    let padded = client
        .create_product(&admin(), listing(" Tote ", "bags", "S", "Red", 1.0))
        .await
        .unwrap_err();
    assert_eq!(padded, ProductError::duplicate_name());

    // Validation is reported before the name collision.
    let mut invalid_dup = listing("Tote", "bags", "S", "Red", 1.0);
    invalid_dup.image = Some("tote.bmp".into());
    assert!(matches!(
        client.create_product(&admin(), invalid_dup).await,
        Err(ProductError::InvalidArgument(_))
    ));

    let rename = ProductUpdate {
        name: Some("Tote".into()),
        ..Default::default()
    };
    let err = client
        .update_product(&admin(), duffel.id, rename)
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::duplicate_name());

    let restock = ProductUpdate {
        count_in_stock: Some(0),
        price: Some(55.0),
        ..Default::default()
    };
    let updated = client
        .update_product(&admin(), duffel.id, restock)
        .await
        .unwrap();
    assert_eq!((updated.count_in_stock, updated.price), (0, 55.0));
    assert_eq!(updated.name, "Duffel");

    let forbidden = client
        .delete_product(&shopper(1), tote.id)
        .await
        .unwrap_err();
    assert!(matches!(forbidden, ProductError::Forbidden(_)));

    client.delete_product(&admin(), tote.id).await.unwrap();
    assert!(matches!(
        client.get_product(tote.id).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        client.delete_product(&admin(), tote.id).await,
        Err(ProductError::NotFound(_))
    ));

    // The freed name can be reused.
    client
        .create_product(&admin(), listing("Tote", "bags", "S", "Red", 1.0))
        .await
        .unwrap();

    drop(client);
    system.shutdown().await.unwrap();
}
