// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::{error::HttpError, state::HttpState},
};
use axum::{
    Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::de::DeserializeOwned;
use std::{fmt, net::SocketAddr};

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

/// A bearer token is optional, but one that is present must be valid.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

async fn authenticate(parts: &Parts) -> Result<Option<AuthenticatedUser>, HttpError> {
    let state = app_state(parts)?;
    match parts.headers.typed_get::<Authorization<Bearer>>() {
        Some(header) => state
            .services
            .authenticate(header.token())
            .await
            .map(Some)
            .map_err(HttpError::from_error),
        None => Ok(None),
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts).await?.map(Self).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            ))
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuthenticated {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts).await.map(Self)
    }
}

/// Best-effort client address: first `X-Forwarded-For` hop, then
/// `X-Real-IP`, then the socket peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    pub fn from_parts(parts: &Parts) -> Self {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        let forwarded = header("x-forwarded-for").and_then(|value| {
            value
                .split(',')
                .next()
                .map(|hop| hop.trim().to_string())
                .filter(|hop| !hop.is_empty())
        });
        let real_ip = header("x-real-ip")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Self(
            forwarded
                .or(real_ip)
                .or(peer)
                .unwrap_or_else(|| "unknown".to_string()),
        )
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// `Json` whose rejections use the error envelope.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
    }
}

/// `Query` whose rejections use the error envelope.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = HttpRequest::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn prefers_first_forwarded_hop() {
        let parts = parts(&[
            ("x-forwarded-for", " 203.0.113.9 , 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(ClientIp::from_parts(&parts).0, "203.0.113.9");
    }

    #[test]
    fn falls_back_to_real_ip_then_peer() {
        let parts_real = parts(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(ClientIp::from_parts(&parts_real).0, "198.51.100.2");

        let mut with_peer = parts(&[]);
        with_peer
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 7], 4000))));
        assert_eq!(ClientIp::from_parts(&with_peer).0, "192.0.2.7");

        assert_eq!(ClientIp::from_parts(&parts(&[])).0, "unknown");
    }
}
