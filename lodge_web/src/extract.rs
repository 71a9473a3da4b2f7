use std::{
    convert::Infallible,
    net::{IpAddr, SocketAddr},
};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use lodge_core::{
    entity::prelude::MemberModel,
    ids::MemberId,
    service::{
        members::MembersServiceError,
        site::{NavItem, SiteSettings},
    },
    visibility::Viewer,
};
use tracing::debug;

use crate::{error::AppError, AppState};

/// The member behind the request, if the authenticating proxy named one.
///
/// A missing header, a malformed id or an id with no member is an
/// anonymous visitor rather than an error.
#[derive(Debug, Clone, Default)]
pub struct CurrentViewer {
    pub member: Option<MemberModel>,
}

impl CurrentViewer {
    pub fn viewer(&self) -> Viewer {
        Viewer::from_authenticated(self.member.is_some())
    }

    pub fn member_id(&self) -> Option<MemberId> {
        self.member.as_ref().map(|member| member.id)
    }

    pub fn require_member(&self) -> Result<&MemberModel, AppError> {
        self.member.as_ref().ok_or(AppError::Unauthenticated)
    }
}

impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = state.core.config.member_header.as_str();
        let Some(raw) = parts
            .headers
            .get(header)
            .and_then(|value| value.to_str().ok())
        else {
            return Ok(Self::default());
        };

        let Ok(id) = MemberId::parse_str(raw.trim()) else {
            debug!(header, "ignoring malformed member id");
            return Ok(Self::default());
        };

        match state.core.members.member(id).await {
            Ok(member) => Ok(Self {
                member: Some(member),
            }),
            Err(MembersServiceError::NotFound) => {
                debug!(member = %id, "unknown member id");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Everything the layout needs around a page body.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub settings: SiteSettings,
    pub nav: Vec<NavItem>,
    pub viewer: CurrentViewer,
    pub path: String,
}

impl Chrome {
    pub fn viewer(&self) -> Viewer {
        self.viewer.viewer()
    }

    pub fn member(&self) -> Option<&MemberModel> {
        self.viewer.member.as_ref()
    }
}

impl FromRequestParts<AppState> for Chrome {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let viewer = CurrentViewer::from_request_parts(parts, state).await?;
        let settings = state.core.site.settings().await?;
        let nav = state.core.site.navigation(viewer.viewer()).await?;

        Ok(Self {
            settings,
            nav,
            viewer,
            path: parts.uri.path().to_owned(),
        })
    }
}

/// Address of the client: first `X-Forwarded-For` entry, else the peer.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|first| first.trim().parse().ok());

        let peer = || {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        };

        Ok(Self(forwarded.or_else(peer)))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn client_ip(request: Request<()>) -> Option<IpAddr> {
        let (mut parts, _) = request.into_parts();
        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        ip
    }

    #[tokio::test]
    async fn test_client_ip_prefers_forwarded_for() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

        assert_eq!(client_ip(request).await, Some("203.0.113.9".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_client_ip_falls_back_to_peer() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "not-an-ip")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 5], 4000))));

        assert_eq!(client_ip(request).await, Some("192.168.1.5".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_client_ip_unknown() {
        let request = Request::builder().body(()).unwrap();

        assert_eq!(client_ip(request).await, None);
    }
}
