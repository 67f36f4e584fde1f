//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod buzzer_tick;
pub mod display;

// Re-export main functions
pub use buzzer_tick::buzzer_tick_task;
pub use display::display_task;
