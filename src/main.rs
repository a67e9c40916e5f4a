use std::sync::Arc;

use axum::{
    Extension, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vnpay_gateway::config::settings::AppSettings;
use vnpay_gateway::handlers;
use vnpay_gateway::payment::vnpay::VnpayGateway;
use vnpay_gateway::repository::order_repository::InMemoryOrderRepository;
use vnpay_gateway::services::payment_service::PaymentService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vnpay_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = AppSettings::from_env();

    let gateway = VnpayGateway::new(settings.vnpay.clone());
    let repository = Arc::new(InMemoryOrderRepository::new());
    let payment_service = Arc::new(PaymentService::new(gateway, repository));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/payment/create", post(handlers::create_payment))
        .route("/api/v1/payment/query/:order_id", get(handlers::query_payment))
        .route("/api/v1/payment/vnpay/return", get(handlers::vnpay_return))
        .route("/api/v1/payment/vnpay/ipn", get(handlers::vnpay_ipn))
        .layer(Extension(payment_service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let app = app.fallback(handler_404);

    let addr = format!("{}:{}", settings.server_host, settings.server_port);
    tracing::info!("vnpay gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
