use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use visitas::config::AppConfig;
use visitas::handlers;
use visitas::services::backend::supabase::SupabaseRpcBackend;
use visitas::services::notify::emailjs::EmailJsSender;
use visitas::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if !config.supabase.is_configured() {
        tracing::warn!(
            "SUPABASE_URL / SUPABASE_ANON_KEY not set; bookings will be rejected as unconfigured"
        );
    }
    if !config.emailjs.is_configured() {
        tracing::info!("EmailJS credentials not set; confirmation emails are disabled");
    }

    let backend = SupabaseRpcBackend::new(config.supabase.clone());
    let mailer = EmailJsSender::new(config.emailjs.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        backend: Box::new(backend),
        mailer: Box::new(mailer),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/visits/options", get(handlers::visits::get_options))
        .route("/api/visits", post(handlers::visits::create_booking))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting visit booking service on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
