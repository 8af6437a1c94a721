mod api;
mod config;
mod desk;
mod form;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod templates;
mod view;

use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revisor=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let config = Arc::new(config);

    let state = Arc::new(state::AppState::new(config.clone()));
    tracing::info!("Using review service at {}", state.api().base_url());
    desk::ReviewDesk::new(state.api().clone(), view::DashboardView::default())
        .check_backend()
        .await;

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Revisor listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
