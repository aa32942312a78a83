//! Request routing dispatch
//!
//! Entry point for HTTP request processing. Every request is checked
//! against the proxy route table first; on a GET prefix match it is
//! forwarded upstream, otherwise it falls through to static serving.

use crate::config::AppState;
use crate::handler::{proxy, static_files};
use crate::http;
use crate::logger;
use crate::routes;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// Never fails: every error is translated into a response within this
/// request, so one bad upstream cannot take the server down.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path();
    let query = uri.query();

    let route = routes::match_route(path);

    let access_log = state.config.logging.access_log;
    if access_log && logger::should_log_request(path, route.is_some()) {
        let shown = uri
            .path_and_query()
            .map_or_else(|| path.to_string(), ToString::to_string);
        logger::log_request(method, &shown);
    }

    // Only GET is proxied; anything else on a route path falls through
    // to the static responder's method handling, same as a miss.
    if let Some(route) = route {
        if *method == Method::GET {
            return Ok(proxy::forward(&state, route, query).await);
        }
    }

    let response = match *method {
        Method::GET | Method::HEAD => {
            static_files::serve(
                &state.config.static_files.root,
                path,
                &state.config.static_files.index_files,
                *method == Method::HEAD,
                access_log,
            )
            .await
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    Ok(response)
}
