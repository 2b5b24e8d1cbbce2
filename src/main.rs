use {
    sqlx::postgres::PgPoolOptions,
    square_fulfill::{
        AppState,
        adapters::{square_client::SquareClient, supabase_client::SupabaseClient, webhook},
        config::Config,
        domain::provider::RecordStore,
        infra::postgres::pending_transaction_repo::PgRecordStore,
    },
    std::{sync::Arc, time::Duration},
    tokio::signal,
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }
    let config = Config::from_env().expect("invalid configuration");

    let http = reqwest::Client::new();
    let square = SquareClient::new(
        http.clone(),
        config.square_environment.base_url(),
        &config.square_access_token,
        &config.square_version,
    );
    let supabase = Arc::new(SupabaseClient::new(
        http,
        &config.supabase_url,
        &config.supabase_service_role_key,
    ));

    let pool = match &config.database_url {
        Some(url) => Some(
            PgPoolOptions::new()
                .max_connections(20)
                .acquire_timeout(Duration::from_secs(3))
                .connect(url)
                .await
                .expect("failed to connect to database"),
        ),
        None => None,
    };
    let records: Arc<dyn RecordStore> = match &pool {
        Some(pool) => {
            tracing::info!("reading pending transactions from postgres");
            Arc::new(PgRecordStore::new(pool.clone()))
        }
        None => supabase.clone(),
    };

    let state = AppState {
        orders: Arc::new(square),
        records,
        functions: supabase,
        error_status: config.error_status,
    };

    let app = webhook::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(
        addr = %config.bind_addr,
        environment = ?config.square_environment,
        "listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Some(pool) = pool {
        pool.close().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
