//! Yakima Basin Dashboard — local development server.
//!
//! Serves the static dashboard files and proxies the fixed set of
//! upstream data endpoints that lack CORS headers (see `routes`).
//!
//! Usage:
//!   yakima-dev-server          # serves on http://localhost:8080
//!   yakima-dev-server 9000     # custom port

use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod routes;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli_port = parse_port_arg()?;

    // Relative static paths must resolve against the server's own
    // directory regardless of where the process was launched from.
    chdir_to_server_dir()?;

    let cfg = config::Config::load(cli_port)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

/// Parse the single optional positional argument, the listening port.
fn parse_port_arg() -> Result<Option<u16>, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u16>()
            .map(Some)
            .map_err(|_| format!("Invalid port argument: '{raw}'").into()),
    }
}

fn chdir_to_server_dir() -> std::io::Result<()> {
    let exe = std::env::current_exe()?;
    if let Some(dir) = exe.parent() {
        std::env::set_current_dir(dir)?;
    }
    Ok(())
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;
    let state = Arc::new(config::AppState::new(cfg)?);

    logger::log_server_start(&addr, routes::PROXY_ROUTES);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, _peer_addr)) => {
                    server::spawn_connection(stream, Arc::clone(&state));
                }
                Err(e) => logger::log_accept_error(&e),
            },

            _ = tokio::signal::ctrl_c() => {
                logger::log_server_stopped();
                return Ok(());
            }
        }
    }
}
