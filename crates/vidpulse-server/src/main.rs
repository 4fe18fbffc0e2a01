mod api;
mod middleware;

use tracing_subscriber::EnvFilter;
use vidpulse_classifier::GeminiClient;
use vidpulse_youtube::YoutubeClient;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Missing DATABASE_URL or either provider credential fails here: the
    // process refuses to start instead of failing every request later.
    let config = vidpulse_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = vidpulse_db::PoolConfig::from_app_config(&config);
    let pool = vidpulse_db::connect_pool(&config.database_url, pool_config).await?;
    vidpulse_db::run_migrations(&pool).await?;

    // Provider clients are built once from process configuration and shared
    // by reference through the router state.
    let youtube = YoutubeClient::new(
        &config.youtube_api_key,
        config.provider_request_timeout_secs,
        &config.provider_user_agent,
    )?;
    let classifier = GeminiClient::new(
        &config.gemini_api_key,
        config.provider_request_timeout_secs,
        &config.provider_user_agent,
    )?;

    let app = build_app(
        AppState {
            pool,
            youtube,
            classifier,
        },
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "vidpulse server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
