use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::server::{
    error::Error,
    model::{app::AppState, auth::Identity},
    service::auth::AuthService,
};

fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Requires a valid, unrevoked bearer token; rejects with 401 otherwise
impl FromRequestParts<AppState> for Identity {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthService::new(&state.tokens, state.blacklist.as_ref())
            .resolve(authorization_header(parts))
            .await
    }
}

/// Caller identity for routes that also serve anonymous callers
///
/// Any failure to resolve the token, including a revocation list outage, is treated as an
/// anonymous request.
pub struct MaybeIdentity(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = authorization_header(parts) else {
            return Ok(Self(None));
        };

        match AuthService::new(&state.tokens, state.blacklist.as_ref())
            .resolve(Some(header))
            .await
        {
            Ok(identity) => Ok(Self(Some(identity))),
            Err(e) => {
                tracing::debug!("Proceeding anonymously, bearer token not accepted: {}", e);

                Ok(Self(None))
            }
        }
    }
}
