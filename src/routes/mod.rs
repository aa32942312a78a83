//! Proxy route table
//!
//! Maps URL path prefixes to the upstream data services the dashboard
//! needs but which do not send CORS headers themselves. The table is
//! fixed: routes are compiled in and never change at runtime.

/// A single proxy route: path prefix mapped to an upstream base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyRoute {
    pub prefix: &'static str,
    pub upstream: &'static str,
}

/// The whitelisted upstreams. Prefixes are mutually exclusive by
/// construction, so at most one entry can match any path.
pub const PROXY_ROUTES: &[ProxyRoute] = &[
    ProxyRoute {
        prefix: "/api/usbr",
        upstream: "https://www.usbr.gov/pn-bin/instant.pl",
    },
    ProxyRoute {
        prefix: "/api/nwrfc",
        upstream: "https://www.nwrfc.noaa.gov/station/flowplot/textPlot.cgi",
    },
];

/// Find the first route whose prefix matches the request path.
///
/// Plain string-prefix test, first match wins. No wildcards, no path
/// parameters. `None` means the request falls through to static serving.
pub fn match_route(path: &str) -> Option<&'static ProxyRoute> {
    PROXY_ROUTES
        .iter()
        .find(|route| path.starts_with(route.prefix))
}

/// Build the upstream target URL for a matched route.
///
/// The inbound query string is passed through byte-for-byte, with no
/// re-encoding and no parameter filtering. An absent or empty query
/// yields the bare upstream base with no trailing `?`.
pub fn upstream_target(route: &ProxyRoute, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", route.upstream, q),
        _ => route.upstream.to_string(),
    }
}
