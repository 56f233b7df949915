//! Plain data: the catalog documents and the payloads that create or change them.

pub mod product;
pub mod review;
pub mod user;

pub use product::{Product, ProductCreate, ProductId, ProductUpdate};
pub use review::{Review, ReviewDraft, ReviewSummary};
pub use user::{CurrentUser, UserId};
