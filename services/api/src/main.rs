use sea_orm::Database;
use tracing::info;

use wayfinder_api::config::ApiConfig;
use wayfinder_api::infra::mailer::AppMailer;
use wayfinder_api::router::build_router;
use wayfinder_api::state::AppState;
use wayfinder_auth_types::token::JwtSecret;
use wayfinder_core::config::Config;
use wayfinder_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("wayfinder_api=info,tower_http=info");

    let config = ApiConfig::from_env().expect("invalid configuration");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = AppMailer::from_config(&config).expect("failed to set up mailer");
    if matches!(mailer, AppMailer::Log(_)) {
        info!("SMTP_HOST not set, confirmation emails will be logged");
    }

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        access_token_ttl_secs: config.access_token_ttl_secs,
        public_url: config.public_url,
        mailer,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("wayfinder api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
