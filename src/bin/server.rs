use std::{
    env::{self},
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use tagkeeper::{
    AccessPolicy, AppState, DEFAULT_TAG_NAMES, build_router, graceful_shutdown, logging_middleware,
};

/// The REST API server for tagkeeper.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Add the default catalogue tags that are not in the database yet.
    #[arg(long)]
    seed_default_tags: bool,

    /// Require the administrator profile for renaming and deleting tags, not just creating them.
    #[arg(long)]
    restrict_edits: bool,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let secret = env::var("SECRET").expect("The environment variable 'SECRET' must be set");

    let policy = if args.restrict_edits {
        AccessPolicy::restricted()
    } else {
        AccessPolicy::default()
    };

    let conn = Connection::open(&args.db_path)
        .unwrap_or_else(|error| panic!("Could not open the database at {}: {error}", args.db_path));
    let state = AppState::new(conn, &secret, policy).expect("Could not initialize the database");

    if args.seed_default_tags {
        let added = state
            .tag_service
            .seed_defaults(&DEFAULT_TAG_NAMES)
            .expect("Could not add the default tags");
        tracing::info!("Added {added} default tag(s)");
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server exited with an error");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are turned into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
