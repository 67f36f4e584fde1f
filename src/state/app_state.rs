//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{Tick, TimerState};

/// Main application state that manages the interval timer and its channels
#[derive(Debug)]
pub struct AppState {
    /// Current timer state
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for start/stop/reset notifications (drives the tick task)
    pub state_change_tx: broadcast::Sender<TimerState>,
    /// Channel for display refreshes, updated on every tick and transition
    pub display_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle timer at zero
    pub fn new(port: u16, host: String) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);
        let (display_update_tx, display_update_rx) = watch::channel(TimerState::new());

        Self {
            timer_state: Arc::new(Mutex::new(TimerState::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
            display_update_tx,
            _display_update_rx: display_update_rx,
        }
    }

    /// Apply a transition to the timer and notify the tick and display tasks
    fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerState, String>
    where
        F: FnOnce(&mut TimerState),
    {
        // Lock the timer state and apply the transition
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        updater(&mut *timer);
        let new_state = timer.clone();
        drop(timer); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // Notify the tick task (this arms or cancels the one-second delay)
        if let Err(e) = self.state_change_tx.send(new_state.clone()) {
            warn!("Failed to send state change notification: {}", e);
        }

        // Re-render the display for the new state
        self.publish_display(new_state.clone());

        Ok(new_state)
    }

    /// Start the timer. The counter keeps its value if already running.
    pub fn start_timer(&self) -> Result<TimerState, String> {
        info!("Starting interval timer");
        self.update_timer("start", |timer| {
            timer.start();
        })
    }

    /// Stop the timer, preserving the elapsed counter
    pub fn stop_timer(&self) -> Result<TimerState, String> {
        info!("Stopping interval timer");
        self.update_timer("stop", |timer| {
            timer.stop();
        })
    }

    /// Reset the timer to idle with zero elapsed seconds
    pub fn reset_timer(&self) -> Result<TimerState, String> {
        info!("Resetting interval timer");
        self.update_timer("reset", |timer| {
            timer.reset();
        })
    }

    /// Advance the timer by one second if it is still running.
    ///
    /// The running flag is re-checked under the lock, so a stop or reset
    /// that raced the one-second delay never produces a tick.
    pub fn advance_tick(&self) -> Result<Option<Tick>, String> {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let tick = timer.tick();
        let snapshot = timer.clone();
        drop(timer);

        if tick.is_some() {
            self.publish_display(snapshot);
        }

        Ok(tick)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn publish_display(&self, snapshot: TimerState) {
        if let Err(e) = self.display_update_tx.send(snapshot) {
            warn!("Failed to send display update: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string())
    }

    #[test]
    fn transitions_track_the_last_action() {
        let state = state();
        state.start_timer().unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(time.is_some());

        state.reset_timer().unwrap();
        let (action, _) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("reset"));
    }

    #[test]
    fn advance_tick_requires_running() {
        let state = state();
        assert!(state.advance_tick().unwrap().is_none());

        state.start_timer().unwrap();
        let tick = state.advance_tick().unwrap().unwrap();
        assert_eq!(tick.elapsed_seconds, 1);
        assert!(!tick.buzzer);

        state.stop_timer().unwrap();
        assert!(state.advance_tick().unwrap().is_none());
        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 1);
    }

    #[test]
    fn reset_while_running_goes_idle_at_zero() {
        let state = state();
        state.start_timer().unwrap();
        for _ in 0..50 {
            state.advance_tick().unwrap();
        }

        let timer = state.reset_timer().unwrap();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_seconds, 0);
    }

    #[test]
    fn ticks_publish_display_updates() {
        let state = state();
        let mut display_rx = state.display_update_tx.subscribe();

        state.start_timer().unwrap();
        assert!(display_rx.has_changed().unwrap());
        display_rx.borrow_and_update();

        state.advance_tick().unwrap();
        assert!(display_rx.has_changed().unwrap());
        assert_eq!(display_rx.borrow_and_update().elapsed_seconds, 1);
    }
}
