//! # rollcall
//!
//! Demo driver for the attendance application core.  Walks the full flow --
//! register, login, capture, mark attendance -- against the local file
//! store, using the synthetic test-pattern camera in place of real video
//! hardware.  Re-running is fine: an already-registered demo account just
//! falls through to login.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rollcall_capture::{CaptureEngine, SyntheticSource};
use rollcall_client::state::View;
use rollcall_client::{AppConfig, Controller, LocalApi};
use rollcall_store::{FileStore, Store};

const DEMO_EMPLOYEE_ID: &str = "DEMO-001";
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rollcall_client=debug")),
        )
        .init();

    info!("Starting Rollcall demo v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration and open storage
    // -----------------------------------------------------------------------
    let config = AppConfig::from_env();
    info!(?config, "Loaded configuration");

    let kv = match &config.data_dir {
        Some(dir) => FileStore::open_at(dir)?,
        None => FileStore::new()?,
    };
    let store = Store::new(Arc::new(kv));

    // -----------------------------------------------------------------------
    // 3. Wire up the controller
    // -----------------------------------------------------------------------
    let api = LocalApi::new(store, config.latency());
    let capture = CaptureEngine::new(Box::new(SyntheticSource::new()), config.capture_config());
    let mut controller = Controller::new(Box::new(api), capture);

    // -----------------------------------------------------------------------
    // 4. Register the demo account (conflict on re-run is expected)
    // -----------------------------------------------------------------------
    controller.show_register();
    let form = &mut controller.state.registration_form;
    form.name = "Asha Demo".to_string();
    form.employee_id = DEMO_EMPLOYEE_ID.to_string();
    form.email = "asha.demo@example.com".to_string();
    form.phone = "1234567890".to_string();
    form.password = DEMO_PASSWORD.to_string();

    controller.start_capture();
    let _ = controller.capture.capture_frame()?;
    controller.submit_registration().await;
    info!(message = ?controller.state.message, "registration step finished");

    // -----------------------------------------------------------------------
    // 5. Log in and mark attendance
    // -----------------------------------------------------------------------
    controller.show_login();
    controller.state.login_form.employee_id = DEMO_EMPLOYEE_ID.to_string();
    controller.state.login_form.password = DEMO_PASSWORD.to_string();
    controller.submit_login().await;
    anyhow::ensure!(
        controller.state.view == View::Dashboard,
        "login failed: {:?}",
        controller.state.message
    );
    info!(
        name = %controller.state.session.as_ref().map(|u| u.name.as_str()).unwrap_or("?"),
        online = controller.state.connectivity.is_online(),
        "logged in"
    );

    controller.start_capture();
    controller.mark_attendance().await;
    info!(message = ?controller.state.message, "attendance step finished");

    // -----------------------------------------------------------------------
    // 6. Show the recent check-ins, then log out
    // -----------------------------------------------------------------------
    for record in controller.state.recent_attendance(5) {
        info!(
            id = %record.id,
            timestamp = %record.timestamp.to_rfc3339(),
            status = ?record.status,
            "recent check-in"
        );
    }

    controller.logout();
    Ok(())
}
