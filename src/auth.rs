//! Caller identity resolved from the `jwt` cookie

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::constants::AUTH_COOKIE_NAME;
use crate::error::AppError;
use crate::security::verify_token;
use crate::AppState;

/// The authenticated owner of the request
///
/// Rejects with [`AppError::Unauthenticated`] before the handler runs, so a
/// missing or bad token never reaches the datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub owner_id: i32,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_COOKIE_NAME)
            .map(|c| c.value().to_owned())
            .ok_or(AppError::Unauthenticated)?;

        let owner_id =
            verify_token(&token, &state.config.secret_key).ok_or(AppError::Unauthenticated)?;

        Ok(Self { owner_id })
    }
}

/// Build the session cookie for a freshly issued token
pub fn session_cookie(token: String, ttl_days: i64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(ttl_days))
        .build()
}

/// Cookie matching the session cookie's path, for removal
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string(), 30);
        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
    }
}
