//! Interval timer state structure and transitions

/// Seconds between buzzer soundings. Fixed, not configurable.
pub const BUZZER_INTERVAL_SECS: u64 = 90;

/// Timer state tracking elapsed time and the 90-second buzzer cycle
#[derive(Debug, Clone)]
pub struct TimerState {
    pub running: bool,
    pub elapsed_seconds: u64,
}

/// Outcome of a single one-second tick
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub elapsed_seconds: u64,
    /// True when this tick landed on a 90-second boundary
    pub buzzer: bool,
}

impl TimerState {
    /// Create a new idle timer at zero elapsed seconds
    pub fn new() -> Self {
        Self {
            running: false,
            elapsed_seconds: 0,
        }
    }

    /// Start the timer. Returns true if the state changed.
    ///
    /// Starting an already-running timer leaves the counter untouched and
    /// must not create an additional tick source.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop the timer, preserving the counter. Returns true if the state changed.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Stop the timer and zero the counter, from any state.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_seconds = 0;
    }

    /// Advance the counter by one second.
    ///
    /// Returns None when the timer is no longer running, i.e. a stop or
    /// reset landed before this tick was processed.
    pub fn tick(&mut self) -> Option<Tick> {
        if !self.running {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(Tick {
            elapsed_seconds: self.elapsed_seconds,
            buzzer: self.elapsed_seconds % BUZZER_INTERVAL_SECS == 0,
        })
    }

    /// Check if the timer is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds remaining until the next buzzer.
    ///
    /// Always in 1..=90; on a buzzer boundary the countdown wraps straight
    /// back to 90 instead of reading 0.
    pub fn until_next_buzzer(&self) -> u64 {
        BUZZER_INTERVAL_SECS - self.elapsed_seconds % BUZZER_INTERVAL_SECS
    }

    /// Elapsed time rendered as M:SS
    pub fn elapsed_display(&self) -> String {
        format_clock(self.elapsed_seconds)
    }

    /// Time until the next buzzer rendered as M:SS
    pub fn buzzer_display(&self) -> String {
        format_clock(self.until_next_buzzer())
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a second count as M:SS (minutes unpadded, seconds zero-padded)
pub fn format_clock(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn until_next_buzzer_stays_in_range() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..400 {
            let until = timer.until_next_buzzer();
            assert!((1..=BUZZER_INTERVAL_SECS).contains(&until));
            assert_eq!(
                until,
                BUZZER_INTERVAL_SECS - timer.elapsed_seconds % BUZZER_INTERVAL_SECS
            );
            timer.tick();
        }
    }

    #[test]
    fn countdown_wraps_to_full_interval_at_boundary() {
        let mut timer = TimerState::new();
        assert_eq!(timer.until_next_buzzer(), 90);

        timer.start();
        for _ in 0..89 {
            timer.tick();
        }
        assert_eq!(timer.until_next_buzzer(), 1);

        let tick = timer.tick().unwrap();
        assert!(tick.buzzer);
        assert_eq!(timer.elapsed_seconds, 90);
        assert_eq!(timer.until_next_buzzer(), 90);
    }

    #[test]
    fn clock_display_splits_minutes_and_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(90), "1:30");
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn start_is_idempotent_on_the_counter() {
        let mut timer = TimerState::new();
        assert!(timer.start());
        for _ in 0..5 {
            timer.tick();
        }
        assert!(!timer.start());
        assert_eq!(timer.elapsed_seconds, 5);
        assert!(timer.is_running());
    }

    #[test]
    fn stop_preserves_the_counter() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..45 {
            timer.tick();
        }
        assert!(timer.stop());
        assert_eq!(timer.elapsed_seconds, 45);

        // No ticks advance a stopped timer
        assert!(timer.tick().is_none());
        assert_eq!(timer.elapsed_seconds, 45);
    }

    #[test]
    fn reset_zeroes_from_any_state() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..50 {
            timer.tick();
        }
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_seconds, 0);

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_seconds, 0);
    }

    #[test]
    fn buzzer_fires_only_on_interval_boundaries() {
        let mut timer = TimerState::new();
        timer.start();
        let boundaries: Vec<u64> = (0..270)
            .filter_map(|_| timer.tick())
            .filter(|tick| tick.buzzer)
            .map(|tick| tick.elapsed_seconds)
            .collect();
        assert_eq!(boundaries, vec![90, 180, 270]);
    }

    #[test]
    fn tick_does_nothing_while_idle() {
        let mut timer = TimerState::new();
        assert!(timer.tick().is_none());
        assert_eq!(timer.elapsed_seconds, 0);
    }

    #[test]
    fn minutes_and_seconds_split_correctly() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..125 {
            timer.tick();
        }
        assert_eq!(timer.elapsed_seconds / 60, 2);
        assert_eq!(timer.elapsed_seconds % 60, 5);
        assert_eq!(timer.elapsed_display(), "2:05");
    }

    #[test]
    fn boundary_tick_reads_full_countdown() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..179 {
            timer.tick();
        }
        assert_eq!(timer.until_next_buzzer(), 1);

        let tick = timer.tick().unwrap();
        assert!(tick.buzzer);
        assert_eq!(timer.elapsed_display(), "3:00");
        assert_eq!(timer.buzzer_display(), "1:30");
    }
}
