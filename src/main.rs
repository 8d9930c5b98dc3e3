use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use astra::Server;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod errors;
mod responses;
mod router;
mod scrape;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    if config.render_token.is_none() {
        warn!("BROWSERLESS_TOKEN not set, web search will fail");
    }
    if config.fetch_api_key.is_none() {
        warn!("ZENROWS_API_KEY not set, listing search will fail");
    }

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!(selectors = %app.catalog.version, "starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => {
            error!(status = err.status(), "request failed: {err}");
            responses::html_error_response(err)
        }
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
