//! Display refresh background task

use std::sync::Arc;

use tracing::info;

use crate::state::AppState;

/// Background task that re-renders the two clocks on every display update.
///
/// This is the stand-in for a screen: each tick and each transition logs
/// the elapsed time and the time remaining until the next buzzer, both as
/// M:SS strings.
pub async fn display_task(state: Arc<AppState>) {
    info!("Starting display task");

    let mut display_rx = state.display_update_tx.subscribe();

    while display_rx.changed().await.is_ok() {
        let snapshot = display_rx.borrow_and_update().clone();
        info!(
            "Elapsed {} | next buzzer in {}{}",
            snapshot.elapsed_display(),
            snapshot.buzzer_display(),
            if snapshot.is_running() { "" } else { " (stopped)" }
        );
    }

    info!("Display channel closed, display task exiting");
}
