//! # Filter Resolver
//!
//! Turns the catalog listing parameters into a single store query.
//!
//! Each predicate (`category`, `size`, `color`) is optional and contributes one equality
//! term; the terms are folded into one conjunctive [`Filter`]. The sort key is a separate,
//! optional stage. Any subset of predicates combines with any sort key, and neither
//! predicates nor sort yields every product in insertion order.
//!
//! ```rust
//! use storefront::filter::{ProductPredicates, SortKey};
//!
//! let predicates = ProductPredicates {
//!     category: Some("shirts".into()),
//!     color: Some("Blue".into()),
//!     ..Default::default()
//! };
//! let query = predicates.to_query(Some(SortKey::PriceDesc));
//! assert!(query.sort.is_some());
//! ```

use actor_framework::query::{Filter, FindQuery, SortSpec};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Optional equality predicates. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPredicates {
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ProductPredicates {
    /// The conjunction of the supplied predicates, `Filter::All` when none are.
    pub fn filter(&self) -> Filter {
        [
            ("category", &self.category),
            ("size", &self.size),
            ("color", &self.color),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| Filter::eq(field, v))
        })
        .fold(Filter::All, Filter::and)
    }

    pub fn to_query(&self, sort: Option<SortKey>) -> FindQuery {
        let query = FindQuery::new(self.filter());
        match sort {
            Some(key) => query.sort(key.spec()),
            None => query,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    RatingAsc,
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingAsc,
        SortKey::RatingDesc,
    ];

    pub fn spec(self) -> SortSpec {
        match self {
            SortKey::PriceAsc => SortSpec::asc("price"),
            SortKey::PriceDesc => SortSpec::desc("price"),
            SortKey::RatingAsc => SortSpec::asc("rating"),
            SortKey::RatingDesc => SortSpec::desc("rating"),
        }
    }

    /// The storefront UI label, as sent in the `filter` query parameter.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "Price (Lowest to Highest)",
            SortKey::PriceDesc => "Price (Highest to Lowest)",
            SortKey::RatingAsc => "Rating (Lowest to Highest)",
            SortKey::RatingDesc => "Rating (Highest to Lowest)",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::RatingDesc => "rating-desc",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts either the UI label or the short token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.label() == s || key.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Query string of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Sort key. Unrecognized values mean no sort.
    pub filter: Option<String>,
}

impl ListProductsParams {
    pub fn into_parts(self) -> (ProductPredicates, Option<SortKey>) {
        let sort = self.filter.as_deref().and_then(|s| s.parse().ok());
        let predicates = ProductPredicates {
            category: self.category,
            size: self.size,
            color: self.color,
        };
        (predicates, sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::query::Order;

    #[test]
    fn no_predicates_no_sort_is_everything() {
        let query = ProductPredicates::default().to_query(None);
        assert_eq!(query, FindQuery::default());
    }

    #[test]
    fn present_predicates_fold_into_one_conjunction() {
        let predicates = ProductPredicates {
            category: Some("shirts".into()),
            size: None,
            color: Some("Red".into()),
        };
        assert_eq!(
            predicates.filter(),
            Filter::And(vec![
                Filter::eq("category", "shirts"),
                Filter::eq("color", "Red")
            ])
        );

        let single = ProductPredicates {
            size: Some("L".into()),
            ..Default::default()
        };
        assert_eq!(single.filter(), Filter::eq("size", "L"));
    }

    #[test]
    fn blank_predicates_are_not_supplied() {
        let predicates = ProductPredicates {
            category: Some("".into()),
            size: Some("  ".into()),
            color: None,
        };
        assert_eq!(predicates.filter(), Filter::All);
    }

    #[test]
    fn sort_is_an_independent_stage() {
        let query = ProductPredicates::default().to_query(Some(SortKey::RatingDesc));
        assert_eq!(query.filter, Filter::All);
        let sort = query.sort.unwrap();
        assert_eq!(sort.field, "rating");
        assert_eq!(sort.order, Order::Desc);
    }

    #[test]
    fn sort_keys_parse_from_labels_and_tokens() {
        for key in SortKey::ALL {
            assert_eq!(key.label().parse::<SortKey>(), Ok(key));
            assert_eq!(key.token().parse::<SortKey>(), Ok(key));
        }
        assert_eq!("PRICE-ASC".parse::<SortKey>(), Ok(SortKey::PriceAsc));
        assert!("Newest".parse::<SortKey>().is_err());
    }

    #[test]
    fn unknown_sort_param_means_no_sort() {
        let params = ListProductsParams {
            category: Some("hats".into()),
            filter: Some("Best Sellers".into()),
            ..Default::default()
        };
        let (predicates, sort) = params.into_parts();
        assert_eq!(predicates.category.as_deref(), Some("hats"));
        assert_eq!(sort, None);
    }
}
