/// ferrite-digit server
///
/// Loads the trained parameters once at startup and serves classification
/// requests over HTTP. Served by a synchronous tiny_http server, one thread
/// per request, all sharing the same read-only network.
///
/// Run with:
///   cargo run --bin digit-server --release -- --params-dir ./model
///
/// Endpoints:
///   GET  /health          — liveness plus hidden layer widths
///   POST /classify        — JSON body {"rows": [[...], ...]}
///   POST /classify/image  — raw PNG/JPEG/BMP/GIF bytes

mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tiny_http::Server;

use ferrite_digit::config::ParamArgs;
use state::AppState;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on.
    #[clap(long, env = "DIGIT_BIND", default_value = "127.0.0.1:7878")]
    bind: String,
    #[clap(flatten)]
    params: ParamArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Parameters are a startup dependency: no valid set, no server.
    let params = args.params.load().context("failed to load network parameters")?;
    let shared_state = Arc::new(AppState::new(&params)?);

    let server = Server::http(&args.bind)
        .map_err(|e| anyhow!("failed to bind HTTP server on {}: {}", args.bind, e))?;
    tracing::info!(bind = %args.bind, "digit server listening");

    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
