use std::sync::Arc;

use certify_sheets::client::SheetsClient;
use certify_web::routes::{router, with_security_headers, AppState};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Run the `serve` command: start the certificate verification web server.
pub async fn run(config_path: &str, port: u16) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let client = SheetsClient::from_config(&config.source)?;
    let sheet_names: Vec<&str> = config.sheets.iter().map(|s| s.name.as_str()).collect();
    info!(sheets = ?sheet_names, "loaded sheet mappings");

    let state = Arc::new(AppState::new(config.clone(), Arc::new(client)));
    let app = with_security_headers(router(state)).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    println!(
        "{} certificate verification listening on http://{}",
        config.certify.instance_name, addr
    );
    info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C handler");
    info!("Received shutdown signal");
}
