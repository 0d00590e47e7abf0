use bytes::Bytes;
use chrono::Utc;
use rand::Rng;

use crate::engine::{CaptureConfig, CaptureError};

/// A single raw frame in RGB8 layout (`width * height * 3` bytes).
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
    pub timestamp_ms: u64,
}

/// Video input device port.
///
/// The engine owns exactly one source and calls it from a single actor, so
/// implementations only need `Send`.  A real deployment implements this
/// against platform capture APIs; tests and the demo binary use
/// [`SyntheticSource`].
pub trait VideoSource: Send {
    /// Acquire the device.  Errors map to a denied or missing camera.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CaptureError>;

    /// Read the most recent frame.  Only called between `open` and `close`.
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Release the device.
    fn close(&mut self);
}

/// Test-pattern source: a diagonal gradient with per-row noise, so that
/// consecutive frames differ and encoded payloads are never empty.
#[derive(Default)]
pub struct SyntheticSource {
    config: Option<CaptureConfig>,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VideoSource for SyntheticSource {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CaptureError> {
        if config.width == 0 || config.height == 0 {
            return Err(CaptureError::Capture(format!(
                "invalid frame size {}x{}",
                config.width, config.height
            )));
        }
        self.config = Some(config.clone());
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        let config = self.config.as_ref().ok_or(CaptureError::NoDevice)?;
        let (width, height) = (config.width, config.height);

        let mut rng = rand::thread_rng();
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            let noise: u8 = rng.gen();
            for x in 0..width {
                let g = (((x + y) * 255) / (width + height)) as u8;
                data.push(g);
                data.push(g.wrapping_add(noise));
                data.push(255 - g);
            }
        }

        Ok(Frame {
            width,
            height,
            data: Bytes::from(data),
            timestamp_ms: Utc::now().timestamp_millis() as u64,
        })
    }

    fn close(&mut self) {
        self.config = None;
    }
}
