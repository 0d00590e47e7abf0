use thiserror::Error;
use tracing::{debug, info};

use rollcall_shared::EncodedImage;

use crate::device::VideoSource;
use crate::encode;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No video device available")]
    NoDevice,

    #[error("Video device access denied")]
    AccessDenied,

    #[error("Frame capture error: {0}")]
    Capture(String),

    #[error("Frame encode error: {0}")]
    Encode(String),
}

/// Capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Streaming,
}

/// Drives a video device through the capture lifecycle.
///
/// `start` opens the device and moves to `Streaming`; if the device refuses,
/// the engine stays `Idle` and the error is reported to the caller.  `stop`
/// releases the device and clears the frame-captured flag.  `capture_frame`
/// is only meaningful while `Streaming`.
pub struct CaptureEngine {
    config: CaptureConfig,
    state: CaptureState,
    frame_captured: bool,
    source: Box<dyn VideoSource>,
}

impl CaptureEngine {
    pub fn new(source: Box<dyn VideoSource>, config: CaptureConfig) -> Self {
        Self {
            config,
            state: CaptureState::Idle,
            frame_captured: false,
            source,
        }
    }

    /// Open the video device and begin streaming.  A no-op if already
    /// streaming.  On failure the engine remains `Idle`.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.state == CaptureState::Streaming {
            return Ok(());
        }
        self.source.open(&self.config)?;
        self.state = CaptureState::Streaming;
        info!(
            width = self.config.width,
            height = self.config.height,
            "capture started"
        );
        Ok(())
    }

    /// Release the device and return to `Idle`.  Also clears the
    /// frame-captured flag.
    pub fn stop(&mut self) {
        if self.state == CaptureState::Streaming {
            self.source.close();
        }
        self.state = CaptureState::Idle;
        self.frame_captured = false;
        debug!("capture stopped");
    }

    /// Freeze the current frame into an encoded still.
    ///
    /// Returns `Ok(None)` while `Idle`, without touching the frame-captured
    /// flag.  While `Streaming` it reads the latest frame from the device,
    /// encodes it, marks the flag, and returns the payload.
    pub fn capture_frame(&mut self) -> Result<Option<EncodedImage>, CaptureError> {
        if self.state != CaptureState::Streaming {
            return Ok(None);
        }
        let frame = self.source.read_frame()?;
        let image = encode::to_jpeg_data_uri(&frame)?;
        self.frame_captured = true;
        debug!(bytes = image.as_str().len(), "frame captured");
        Ok(Some(image))
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state == CaptureState::Streaming
    }

    /// Whether a frame has been captured since the last `stop`.
    pub fn frame_captured(&self) -> bool {
        self.frame_captured
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }
}
