use clap::Parser;
use mimalloc::MiMalloc;
use snippetbox::config::{Cli, Config, Settings};
use snippetbox::{Dsn, SnippetboxError};
use std::process;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // The .env file is optional. It has to load before any variable is
    // read; the warning waits until the subscriber exists.
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env();
    let settings = Settings::resolve(&config, Cli::parse());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if dotenv.is_err() {
        warn!("no .env file found, using environment variables and defaults");
    }

    if let Err(err) = run(settings).await {
        error!(error = %err, "fatal");
        process::exit(1);
    }
}

async fn run(settings: Settings) -> Result<(), SnippetboxError> {
    let dsn = Dsn::parse(&settings.dsn)?;
    let pool = snippetbox::db::open(&dsn).await?;

    let state = snippetbox::router::AppState::new(pool.clone());
    let app = snippetbox::router::app(state);

    info!(addr = %settings.addr, "starting server");

    let listener = TcpListener::bind(settings.bind_target()).await?;
    let served = axum::serve(listener, app).await;

    // Any return from the serve loop is fatal; release the pool before
    // surfacing it.
    pool.close().await;
    match served {
        Ok(()) => Err(SnippetboxError::ServerClosed),
        Err(err) => Err(err.into()),
    }
}
