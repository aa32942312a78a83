//! Logger module
//!
//! Console logging for interactive development. Proxy requests are always
//! surfaced (they are the interesting traffic when debugging upstream
//! issues); routine static-asset fetches are suppressed to keep the
//! console readable.

use crate::routes::ProxyRoute;
use chrono::Local;
use std::net::SocketAddr;

/// Extensions whose requests are noise during interactive development.
/// Substring match, same as the log line the browser would otherwise spam
/// for every stylesheet, script, image, icon, and font fetch.
const NOISY_ASSET_EXTENSIONS: &[&str] = &[".css", ".js", ".png", ".ico", ".woff"];

/// Whether a non-route request path is routine asset noise.
pub fn is_noisy_asset(path: &str) -> bool {
    NOISY_ASSET_EXTENSIONS.iter().any(|ext| path.contains(ext))
}

/// Decide whether a request line should be logged.
///
/// Proxy-route requests always log, regardless of extension. Everything
/// else logs unless it looks like a static-asset fetch.
pub fn should_log_request(path: &str, is_proxy_route: bool) -> bool {
    is_proxy_route || !is_noisy_asset(path)
}

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y:%H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, routes: &[ProxyRoute]) {
    println!("Yakima Dashboard → http://{addr}");
    for route in routes {
        println!("Proxy {:12} → {}", route.prefix, route.upstream);
    }
    println!("Press Ctrl+C to stop.\n");
}

pub fn log_server_stopped() {
    println!("\nServer stopped.");
}

pub fn log_request(method: &hyper::Method, path_and_query: &str) {
    println!("[{}] \"{} {}\"", timestamp(), method, path_and_query);
}

pub fn log_response(status: u16, size: usize) {
    println!("[{}] → {} ({} bytes)", timestamp(), status, size);
}

pub fn log_proxy_forward(target: &str) {
    println!("[{}] proxy → {}", timestamp(), target);
}

pub fn log_accept_error(err: &std::io::Error) {
    eprintln!("[ERROR] Failed to accept connection: {err}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
