//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Timer snapshot included in API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub running: bool,
    pub elapsed_seconds: u64,
    /// Elapsed time as M:SS
    pub elapsed_display: String,
    pub next_buzzer_seconds: u64,
    /// Time until the next buzzer as M:SS
    pub next_buzzer_display: String,
}

impl From<TimerState> for TimerSnapshot {
    fn from(timer: TimerState) -> Self {
        Self {
            running: timer.is_running(),
            elapsed_seconds: timer.elapsed_seconds,
            elapsed_display: timer.elapsed_display(),
            next_buzzer_seconds: timer.until_next_buzzer(),
            next_buzzer_display: timer.buzzer_display(),
        }
    }
}

/// API response structure for the start/stop/reset endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response for a timer that is now running
    pub fn running(message: String, timer: TimerSnapshot) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create a response for a timer that is now idle
    pub fn idle(message: String, timer: TimerSnapshot) -> Self {
        Self::new("idle".to_string(), message, timer)
    }
}

/// Status response with both clock displays and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "0.1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_carries_both_displays() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..95 {
            timer.tick();
        }

        let snapshot = TimerSnapshot::from(timer);
        assert!(snapshot.running);
        assert_eq!(snapshot.elapsed_seconds, 95);
        assert_eq!(snapshot.elapsed_display, "1:35");
        assert_eq!(snapshot.next_buzzer_seconds, 85);
        assert_eq!(snapshot.next_buzzer_display, "1:25");
    }

    #[test]
    fn snapshot_of_fresh_timer_shows_full_countdown() {
        let snapshot = TimerSnapshot::from(TimerState::new());
        assert!(!snapshot.running);
        assert_eq!(snapshot.elapsed_display, "0:00");
        assert_eq!(snapshot.next_buzzer_display, "1:30");
    }
}
