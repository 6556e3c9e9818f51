use tracing_subscriber::EnvFilter;

use vitalguard_dashboard::config::DashboardConfig;
use vitalguard_dashboard::router;
use vitalguard_dashboard::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = DashboardConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let info = config.info();
    tracing::info!(
        model_path = info.model_path.as_str(),
        inference_url = info.inference_url.as_str(),
        model_id = info.model_id.as_str(),
        timeout_secs = info.timeout_secs,
        max_retries = info.max_retries,
        insight_deadline_secs = info.insight_deadline_secs,
        token = info.token_hint.as_deref().unwrap_or("<unset>"),
        "starting vitalguard dashboard"
    );
    if config.hf_token.is_none() {
        tracing::warn!("HF_TOKEN is not set; clinical insight generation will be unavailable");
    }

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
