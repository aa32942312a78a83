//! Proxy forwarder
//!
//! Relays a matched request's query string to the route's upstream and
//! relays the response back with `Access-Control-Allow-Origin: *`
//! injected. One upstream call per request, no retries, no caching; the
//! client timeout bounds the total wait so the handler never hangs.

use crate::config::AppState;
use crate::http::response;
use crate::logger;
use crate::routes::{self, ProxyRoute};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use thiserror::Error;

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Why a proxy forward produced no relayable body.
///
/// The two classes map to distinct outbound statuses: an upstream HTTP
/// error keeps the upstream's status, a transport failure becomes 502.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Upstream error: {reason}")]
    UpstreamStatus { status: u16, reason: String },

    #[error("Proxy error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProxyError {
    /// The status code the client should see for this failure.
    pub fn client_status(&self) -> u16 {
        match self {
            Self::UpstreamStatus { status, .. } => *status,
            Self::Transport(_) => 502,
        }
    }
}

/// Forward a matched request upstream and build the client response.
///
/// Always produces a response; failures are translated, never
/// propagated. `query` is the raw inbound query string, relayed
/// unmodified.
pub async fn forward(
    state: &AppState,
    route: &ProxyRoute,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let target = routes::upstream_target(route, query);
    if state.config.logging.access_log {
        logger::log_proxy_forward(&target);
    }

    match fetch(state, &target).await {
        Ok((body, content_type)) => {
            if state.config.logging.access_log {
                logger::log_response(200, body.len());
            }
            response::build_proxied_response(body, &content_type, false)
        }
        Err(err) => {
            logger::log_error(&format!("{} {target}: {err}", route.prefix));
            response::build_proxy_error_response(err.client_status(), &err.to_string())
        }
    }
}

/// Issue the single upstream GET and buffer the response body.
async fn fetch(state: &AppState, target: &str) -> Result<(Bytes, String), ProxyError> {
    let resp = state.http_client.get(target).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProxyError::UpstreamStatus {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown upstream status")
                .to_string(),
        });
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    // Full body buffered in memory, no size cap; this is a local
    // single-developer tool relaying modest text payloads.
    let body = resp.bytes().await?;

    Ok((body, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_maps_to_same_code() {
        let err = ProxyError::UpstreamStatus {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.client_status(), 404);
        assert_eq!(err.to_string(), "Upstream error: Not Found");
    }

    #[test]
    fn test_upstream_5xx_passes_through() {
        let err = ProxyError::UpstreamStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.client_status(), 503);
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_upstream_error_response_includes_reason_and_cors() {
        let err = ProxyError::UpstreamStatus {
            status: 404,
            reason: "Not Found".to_string(),
        };
        let resp =
            response::build_proxy_error_response(err.client_status(), &err.to_string());
        assert_eq!(resp.status(), 404);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }
}
