//! HTTP response building
//!
//! Builders for the responses this server emits. Proxy-route responses
//! always carry `Access-Control-Allow-Origin: *`; static responses never
//! do. That invariant is the whole point of the proxy.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build the 200 response relaying an upstream body to the browser.
///
/// Mirrors the upstream's content type and injects the permissive
/// cross-origin header so the dashboard can read the body.
pub fn build_proxied_response(body: Bytes, content_type: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("proxied 200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build an error response for a failed proxy forward.
///
/// Carries the cross-origin header as well: the path matched a proxy
/// route, so the browser must be able to read the failure.
pub fn build_proxy_error_response(status: u16, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", message.len())
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("proxy error", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response for a static file
pub fn build_static_file_response(
    data: Vec<u8>,
    content_type: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxied_response_carries_cors_and_length() {
        let body = Bytes::from_static(b"DATE/TIME, FLOW\n");
        let resp = build_proxied_response(body.clone(), "text/plain", false);

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/plain");
        assert_eq!(
            resp.headers().get("Content-Length").unwrap(),
            &body.len().to_string()
        );
    }

    #[test]
    fn test_proxied_head_response_has_empty_body_but_full_length() {
        let body = Bytes::from_static(b"payload");
        let resp = build_proxied_response(body, "text/plain", true);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "7");
    }

    #[test]
    fn test_proxy_error_response_keeps_status_and_cors() {
        let resp = build_proxy_error_response(404, "Upstream error: Not Found");
        assert_eq!(resp.status(), 404);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_transport_failures_map_to_502() {
        let resp = build_proxy_error_response(502, "Proxy error: connection refused");
        assert_eq!(resp.status(), 502);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_static_response_has_no_cors_header() {
        let resp = build_static_file_response(b"<html></html>".to_vec(), "text/html; charset=utf-8", false);
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }
}
