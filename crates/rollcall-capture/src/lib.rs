//! # rollcall-capture
//!
//! Camera capture for the Rollcall application.  A [`CaptureEngine`] drives
//! a [`VideoSource`] device port through the `Idle -> Streaming -> Idle`
//! lifecycle and freezes single frames into base64 JPEG data URIs.
//!
//! No face detection or matching happens here; the subsystem's whole job is
//! producing an encoded still on demand.

pub mod device;
pub mod encode;
pub mod engine;

pub use device::{Frame, SyntheticSource, VideoSource};
pub use engine::{CaptureConfig, CaptureEngine, CaptureError, CaptureState};
