//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the application runs with zero
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use rollcall_capture::CaptureConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the collection blobs.
    /// Env: `ROLLCALL_DATA_DIR`
    /// Default: platform data directory (`~/.local/share/rollcall` on Linux).
    pub data_dir: Option<PathBuf>,

    /// Simulated request latency in milliseconds.
    /// Env: `ROLLCALL_LATENCY_MS`
    /// Default: `1000`
    pub request_latency_ms: u64,

    /// Capture frame width in pixels.
    /// Env: `ROLLCALL_CAPTURE_WIDTH`
    /// Default: `640`
    pub capture_width: u32,

    /// Capture frame height in pixels.
    /// Env: `ROLLCALL_CAPTURE_HEIGHT`
    /// Default: `480`
    pub capture_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            request_latency_ms: 1000,
            capture_width: 640,
            capture_height: 480,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ROLLCALL_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(val) = std::env::var("ROLLCALL_LATENCY_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.request_latency_ms = ms,
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid ROLLCALL_LATENCY_MS, using default");
                }
            }
        }

        if let Ok(val) = std::env::var("ROLLCALL_CAPTURE_WIDTH") {
            match val.parse::<u32>() {
                Ok(w) if w > 0 => config.capture_width = w,
                _ => {
                    tracing::warn!(value = %val, "Invalid ROLLCALL_CAPTURE_WIDTH, using default");
                }
            }
        }

        if let Ok(val) = std::env::var("ROLLCALL_CAPTURE_HEIGHT") {
            match val.parse::<u32>() {
                Ok(h) if h > 0 => config.capture_height = h,
                _ => {
                    tracing::warn!(value = %val, "Invalid ROLLCALL_CAPTURE_HEIGHT, using default");
                }
            }
        }

        config
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.request_latency_ms)
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            width: self.capture_width,
            height: self.capture_height,
        }
    }
}
