//! Bearer token authentication extractors.
//!
//! Tokens are verified against the accounts service public key; the
//! caller's role is then read from the users table, so a role change takes
//! effect without reissuing tokens.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use domain::models::{Actor, User};
use persistence::repositories::UserRepository;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user: User,
}

impl UserAuth {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn actor(&self) -> Actor {
        self.user.actor()
    }
}

/// An authenticated caller, or nobody.
///
/// A missing or unusable token yields `None` rather than a rejection, so
/// public endpoints stay reachable.
#[derive(Debug, Clone)]
pub struct OptionalUserAuth(pub Option<UserAuth>);

impl OptionalUserAuth {
    pub fn actor(&self) -> Option<Actor> {
        self.0.as_ref().map(UserAuth::actor)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(UserAuth::user_id)
    }
}

/// Returns the token of a `Bearer` authorization header.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<UserAuth, ApiError> {
    let token = bearer_token(parts)?;

    let user_id = state.verifier.validate_access_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "Token subject has no user record");
            ApiError::Unauthorized("Unknown user".to_string())
        })?;

    Ok(UserAuth { user: user.into() })
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(auth.clone());
        }

        let auth = authenticate(parts, state).await?;
        parts.extensions.insert(auth.clone());
        Ok(auth)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(OptionalUserAuth(None));
        }

        match authenticate(parts, state).await {
            Ok(auth) => Ok(OptionalUserAuth(Some(auth))),
            Err(ApiError::Unauthorized(_)) => Ok(OptionalUserAuth(None)),
            Err(other) => Err(other),
        }
    }
}
