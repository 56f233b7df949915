//! The acting user, read from the headers the upstream auth layer attaches.
//!
//! Values are trusted verbatim; this layer only refuses requests that carry no user.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;
use crate::model::CurrentUser;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const FIRST_NAME_HEADER: &str = "x-user-first-name";
pub const LAST_NAME_HEADER: &str = "x-user-last-name";
pub const ADMIN_HEADER: &str = "x-user-admin";

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, USER_ID_HEADER).ok_or(ApiError::Unauthorized)?;
        let user = CurrentUser::new(
            id,
            header(parts, FIRST_NAME_HEADER).unwrap_or_default(),
            header(parts, LAST_NAME_HEADER).unwrap_or_default(),
        );
        let is_admin =
            header(parts, ADMIN_HEADER).is_some_and(|v| v.eq_ignore_ascii_case("true"));

        Ok(if is_admin { user.admin() } else { user })
    }
}
