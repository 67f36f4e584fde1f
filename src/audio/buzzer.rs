//! Buzzer playback service
//!
//! Runs in a background task, receiving playback requests via channel.
//! The sound file is read once at startup; a missing or unreadable file
//! leaves the buzzer silent instead of failing startup, and playback
//! failures are logged without affecting the timer.

use std::{fs, io::Cursor, path::Path};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Playback requests accepted by the buzzer service
#[derive(Debug, Clone)]
pub enum BuzzerEvent {
    /// Play the buzzer sound once
    Play,
}

/// Sender handle for requesting buzzer playback
pub type BuzzerSender = mpsc::Sender<BuzzerEvent>;

/// Create a new buzzer channel
pub fn create_buzzer_channel() -> (BuzzerSender, mpsc::Receiver<BuzzerEvent>) {
    // A handful of pending requests is plenty; playback is fire-and-forget
    mpsc::channel(16)
}

/// Buzzer service backed by a sound file loaded at startup
pub struct BuzzerService {
    /// Channel to receive playback requests
    event_rx: mpsc::Receiver<BuzzerEvent>,
    /// Raw sound bytes, None when loading failed and the buzzer is silent
    sound: Option<Vec<u8>>,
}

impl BuzzerService {
    /// Create a new buzzer service, reading the sound file eagerly
    pub fn new(event_rx: mpsc::Receiver<BuzzerEvent>, sound_path: &Path) -> Self {
        let sound = match fs::read(sound_path) {
            Ok(bytes) => {
                info!(
                    "Loaded buzzer sound from {} ({} bytes)",
                    sound_path.display(),
                    bytes.len()
                );
                Some(bytes)
            }
            Err(e) => {
                warn!(
                    "Failed to load buzzer sound from {}: {} (buzzer will be silent)",
                    sound_path.display(),
                    e
                );
                None
            }
        };

        Self { event_rx, sound }
    }

    /// Run the buzzer service (blocking async loop)
    pub async fn run(mut self) {
        while let Some(event) = self.event_rx.recv().await {
            match event {
                BuzzerEvent::Play => {
                    let Some(bytes) = self.sound.clone() else {
                        debug!("Buzzer requested but no sound is loaded, staying silent");
                        continue;
                    };
                    play_sound(bytes);
                }
            }
        }
    }

    /// Check whether a sound is loaded and playback is possible
    pub fn has_sound(&self) -> bool {
        self.sound.is_some()
    }
}

/// Decode and play one buzzer sound on a dedicated thread.
///
/// rodio output streams are not Send, so playback gets its own thread;
/// the completion outcome is logged there and nowhere else.
fn play_sound(bytes: Vec<u8>) {
    std::thread::spawn(move || {
        use rodio::{Decoder, OutputStream, Sink};

        let (_stream, stream_handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                warn!("Buzzer playback failed: no audio output available: {}", e);
                return;
            }
        };

        let source = match Decoder::new(Cursor::new(bytes)) {
            Ok(source) => source,
            Err(e) => {
                warn!("Buzzer playback failed due to audio decoding errors: {}", e);
                return;
            }
        };

        let sink = match Sink::try_new(&stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                warn!("Buzzer playback failed: {}", e);
                return;
            }
        };

        sink.append(source);
        sink.sleep_until_end();
        debug!("Buzzer playback finished");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sound_file_leaves_buzzer_silent() {
        let (_tx, rx) = create_buzzer_channel();
        let service = BuzzerService::new(rx, Path::new("/nonexistent/buzzer.mp3"));
        assert!(!service.has_sound());
    }
}
