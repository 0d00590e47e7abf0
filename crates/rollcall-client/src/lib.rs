//! # rollcall-client
//!
//! The view controller of the Rollcall attendance application.  One logical
//! actor owns the view state (`Login | Register | Dashboard`), the form
//! buffers, and the capture engine, and dispatches every user action
//! through the [`AttendanceApi`] request/response port.  The bundled
//! [`LocalApi`] implementation answers from the local store behind an
//! artificial delay; swapping it for a real network client never touches
//! the controller.

pub mod api;
pub mod config;
pub mod controller;
pub mod state;

pub use api::{AttendanceApi, LocalApi, RequestError};
pub use config::AppConfig;
pub use controller::Controller;
pub use state::{AppState, LoginForm, RegistrationForm, View};
