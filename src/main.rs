use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bill_tracker_server::config::load_config;
use bill_tracker_server::core::error::AppError;
use bill_tracker_server::core::http_client::build_http_client;
use bill_tracker_server::features::analysis::{AnalysisService, ChatModel, OpenAiClient};
use bill_tracker_server::features::bills::{
    BillStore, handle_analyze_bill, handle_get_bill, handle_healthcheck, handle_list_bills,
    handle_refresh_bill, handle_refresh_bills, handle_search_bills,
};
use bill_tracker_server::features::congress::{BillSource, CongressClient};
use bill_tracker_server::server::{AppState, require_admin_key};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = Arc::new(load_config()?);

    let http_client = build_http_client(config.disable_proxy)
        .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

    let sled_db = sled::open(&config.db_path).map_err(|err| {
        AppError::internal(format!(
            "failed to open sled database at {}: {err}",
            config.db_path
        ))
    })?;
    let bills_tree = sled_db
        .open_tree("bills")
        .map_err(|err| AppError::internal(format!("failed to open bills tree: {err}")))?;
    let store = Arc::new(BillStore::new(bills_tree));

    let congress_client = Arc::new(CongressClient::new(config.clone(), http_client.clone()));
    let bill_source: Arc<dyn BillSource> = congress_client;

    let chat_model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(config.clone(), http_client));
    let analysis_service = Arc::new(AnalysisService::new(chat_model));

    let app_state = AppState::new(
        bill_source,
        store,
        analysis_service,
        config.admin_api_key.clone(),
    );

    let admin_routes = Router::new()
        .route("/api/bills/refresh", post(handle_refresh_bills))
        .route("/api/bills/:id/refresh", post(handle_refresh_bill))
        .route("/api/bills/:id/analysis", post(handle_analyze_bill))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_admin_key,
        ));

    let app = Router::new()
        .route("/api/health", get(handle_healthcheck))
        .route("/api/bills", get(handle_list_bills))
        .route("/api/bills/search", get(handle_search_bills))
        .route("/api/bills/:id", get(handle_get_bill))
        .merge(admin_routes)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "starting server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_target(false)
        .init();
}
