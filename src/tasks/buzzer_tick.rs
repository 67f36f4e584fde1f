//! Interval tick background task

use std::{sync::Arc, time::Duration};

use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, error, info, warn};

use crate::{
    audio::{BuzzerEvent, BuzzerSender},
    state::AppState,
};

/// Background task that drives the one-second tick while the timer runs.
///
/// While the timer is idle the task blocks on state change notifications.
/// A start notification arms a one-second cadence; every firing advances
/// the counter by exactly one and requests a buzzer sound when the new
/// value lands on a 90-second boundary. Any transition out of the running
/// state cancels the pending delay, so at most one tick source exists at
/// any moment.
pub async fn buzzer_tick_task(state: Arc<AppState>, buzzer: BuzzerSender) {
    info!("Starting buzzer tick task");

    let mut state_rx = state.state_change_tx.subscribe();

    loop {
        // Wait for a state change notification
        match state_rx.recv().await {
            Ok(current) => {
                if !current.is_running() {
                    debug!("Timer idle, waiting for start");
                    continue;
                }

                info!(
                    "Timer running from {} elapsed seconds",
                    current.elapsed_seconds
                );

                // One-second cadence; the first tick lands a full second
                // after start, not immediately.
                let mut ticker = interval_at(
                    Instant::now() + Duration::from_secs(1),
                    Duration::from_secs(1),
                );

                loop {
                    tokio::select! {
                        // Tick - advance the counter and check the buzzer boundary
                        _ = ticker.tick() => {
                            match state.advance_tick() {
                                Ok(Some(tick)) => {
                                    debug!("Tick: {} elapsed seconds", tick.elapsed_seconds);

                                    if tick.buzzer {
                                        info!(
                                            "Buzzer boundary reached at {} seconds",
                                            tick.elapsed_seconds
                                        );
                                        if let Err(e) = buzzer.try_send(BuzzerEvent::Play) {
                                            warn!("Failed to queue buzzer playback: {}", e);
                                        }
                                    }
                                }
                                Ok(None) => {
                                    // A stop or reset landed between the delay
                                    // firing and the tick being processed.
                                    debug!("Timer no longer running, cancelling tick loop");
                                    break;
                                }
                                Err(e) => {
                                    error!("Failed to advance timer: {}", e);
                                    break;
                                }
                            }
                        }

                        // State change - check if the pending tick should be cancelled
                        Ok(new_state) = state_rx.recv() => {
                            if !new_state.is_running() {
                                info!("Timer left running state, cancelling pending tick");
                                break;
                            }
                            // A redundant start while running: the pending
                            // delay stays armed and the counter is untouched.
                            debug!("Timer already running, ignoring redundant start");
                        }
                    }
                }
            }
            Err(e) => {
                error!("Error receiving state change: {}", e);
                // Wait a bit before retrying
                sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
