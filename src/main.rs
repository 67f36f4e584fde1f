//! Shift Buzzer - an interval timer service with a 90-second buzzer
//!
//! This is the main entry point for the shift-buzzer application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use shift_buzzer::{
    api::create_router,
    audio::{create_buzzer_channel, BuzzerService},
    config::Config,
    state::AppState,
    tasks::{buzzer_tick_task, display_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("shift_buzzer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting shift-buzzer server v0.1.0");
    info!(
        "Configuration: host={}, port={}, sound={}",
        config.host,
        config.port,
        config.sound.display()
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the buzzer playback service; a missing sound file is logged
    // and leaves the buzzer silent
    let (buzzer_tx, buzzer_rx) = create_buzzer_channel();
    let buzzer_service = BuzzerService::new(buzzer_rx, &config.sound);
    tokio::spawn(async move {
        buzzer_service.run().await;
    });

    // Start the tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        buzzer_tick_task(tick_state, buzzer_tx).await;
    });

    // Start the display refresh task
    let display_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_task(display_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start the interval timer");
    info!("  POST /stop   - Stop the interval timer");
    info!("  POST /reset  - Reset elapsed time to zero");
    info!("  GET  /status - Check timer status and displays");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
