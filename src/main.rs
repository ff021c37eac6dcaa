use std::net::SocketAddr;

use anyhow::Context;
use tower_http::trace::TraceLayer;

use todo_api::{
    config::{AppConfig, load_dotenv},
    db::connection,
    logging::init_tracing,
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() {
    // No subscriber exists until the config is loaded, so these go to stderr.
    let dotenv = match load_dotenv() {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{err:?}");
            std::process::exit(1);
        }
    };
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err:?}");
            std::process::exit(1);
        }
    };

    init_tracing(&cfg.logging);
    match dotenv {
        Some(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        None => tracing::debug!("no .env file found"),
    }

    if let Err(err) = run(cfg).await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connection::connect(&cfg.database).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                cfg.general.host, cfg.general.port
            )
        })?;

    let state = AppState::from_db(cfg, &db);
    let app = routes::app(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
