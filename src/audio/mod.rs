//! Buzzer sound module
//!
//! This module contains the sound-playback primitive: a channel-fed
//! background service that plays the buzzer sound on request.

pub mod buzzer;

// Re-export main types
pub use buzzer::{create_buzzer_channel, BuzzerEvent, BuzzerSender, BuzzerService};
