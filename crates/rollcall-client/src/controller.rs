//! The view controller: one logical actor processing user-triggered events
//! one at a time.
//!
//! Every submit action validates its form, flips the `loading` flag for
//! exactly the duration of the api call, and lands back on the current view
//! with a human-readable message on failure.  A second submit while a
//! request is in flight is refused (the `loading` guard); there is no
//! cancellation path.

use tracing::{debug, info, warn};

use rollcall_capture::CaptureEngine;
use rollcall_shared::{Connectivity, ValidationError};

use crate::api::{AttendanceApi, LoginRequest, RegisterRequest, RequestError};
use crate::state::{AppState, View};

pub struct Controller {
    pub state: AppState,
    pub capture: CaptureEngine,
    api: Box<dyn AttendanceApi>,
}

impl Controller {
    pub fn new(api: Box<dyn AttendanceApi>, capture: CaptureEngine) -> Self {
        Self {
            state: AppState::new(),
            capture,
            api,
        }
    }

    pub fn show_login(&mut self) {
        self.state.view = View::Login;
    }

    pub fn show_register(&mut self) {
        self.state.view = View::Register;
    }

    /// Start the camera preview.  On device failure the capture subsystem
    /// stays idle and the error is shown inline.
    pub fn start_capture(&mut self) {
        if let Err(e) = self.capture.start() {
            warn!(error = %e, "camera start failed");
            self.state.message = Some("Camera access denied or not available".to_string());
        }
    }

    pub fn stop_capture(&mut self) {
        self.capture.stop();
    }

    pub async fn submit_login(&mut self) {
        if self.state.loading {
            debug!("login ignored, request already in flight");
            return;
        }
        if let Err(e) = self.state.login_form.validate() {
            self.state.message = Some(e.to_string());
            return;
        }

        let request = LoginRequest {
            employee_id: self.state.login_form.employee_id.clone(),
            password: self.state.login_form.password.clone(),
        };

        self.state.loading = true;
        let result = self.api.login(request).await;
        self.state.loading = false;

        match result {
            Ok(outcome) => {
                info!(employee_id = %outcome.user.employee_id, "login succeeded");
                self.state.session = Some(outcome.user);
                self.state.attendance = outcome.attendance;
                self.state.view = View::Dashboard;
                self.state.message = Some("Login successful!".to_string());
            }
            Err(e) => {
                self.state.message = Some(format!("Login failed: {e}"));
            }
        }
    }

    pub async fn submit_registration(&mut self) {
        if self.state.loading {
            debug!("registration ignored, request already in flight");
            return;
        }
        if let Err(e) = self.state.registration_form.validate() {
            self.state.message = Some(e.to_string());
            return;
        }
        if !self.capture.frame_captured() {
            self.state.message = Some(ValidationError::FaceNotCaptured.to_string());
            return;
        }

        // Re-freeze the frame at submit time so the stored still is current.
        let face_image = match self.capture.capture_frame() {
            Ok(Some(image)) => image,
            Ok(None) => {
                self.state.message = Some(ValidationError::FaceNotCaptured.to_string());
                return;
            }
            Err(e) => {
                self.state.message = Some(format!("Registration failed: {e}"));
                return;
            }
        };

        let form = &self.state.registration_form;
        let request = RegisterRequest {
            name: form.name.clone(),
            employee_id: form.employee_id.clone(),
            email: form.email.clone(),
            aadhaar_number: (!form.aadhaar_number.is_empty())
                .then(|| form.aadhaar_number.clone()),
            phone: form.phone.clone(),
            password: form.password.clone(),
            face_image,
        };

        self.state.loading = true;
        let result = self.api.register(request).await;
        self.state.loading = false;

        match result {
            Ok(account) => {
                info!(employee_id = %account.employee_id, "registration succeeded");
                self.state.message =
                    Some("Registration successful! You can now login.".to_string());
                self.state.view = View::Login;
                self.capture.stop();
                self.state.registration_form.clear();
            }
            Err(e) => {
                self.state.message = Some(format!("Registration failed: {e}"));
            }
        }
    }

    pub async fn mark_attendance(&mut self) {
        if self.state.loading {
            debug!("mark attendance ignored, request already in flight");
            return;
        }
        let Some(user) = self.state.session.clone() else {
            self.state.message =
                Some(format!("Failed to mark attendance: {}", RequestError::NoSession));
            return;
        };

        let face_image = match self.capture.capture_frame() {
            Ok(Some(image)) => image,
            Ok(None) => {
                self.state.message = Some("Please capture your face for attendance".to_string());
                return;
            }
            Err(e) => {
                self.state.message = Some(format!("Failed to mark attendance: {e}"));
                return;
            }
        };

        self.state.loading = true;
        let result = self.api.mark_attendance(&user, face_image).await;
        self.state.loading = false;

        match result {
            Ok(record) => {
                self.state.attendance.insert(0, record);
                self.state.message = Some("Attendance marked successfully!".to_string());
                self.capture.stop();
            }
            Err(e) => {
                self.state.message = Some(format!("Failed to mark attendance: {e}"));
            }
        }
    }

    pub fn logout(&mut self) {
        info!("logout");
        self.state.session = None;
        self.state.attendance.clear();
        self.state.view = View::Login;
        self.capture.stop();
    }

    /// Erase everything.  A no-op unless the user explicitly confirmed.
    pub async fn clear_all_data(&mut self, confirmed: bool) {
        if !confirmed {
            debug!("clear all data cancelled");
            return;
        }
        self.api.clear_all().await;
        self.state.attendance.clear();
        self.state.message = Some("All data cleared successfully".to_string());
    }

    /// Mirror the environment's online/offline signal.  Display only.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.state.connectivity = connectivity;
    }

    pub fn dismiss_message(&mut self) {
        self.state.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use rollcall_capture::{CaptureConfig, SyntheticSource};
    use rollcall_store::{MemoryStore, Store};

    use crate::api::LocalApi;
    use crate::state::RegistrationForm;

    fn fixture() -> (Controller, Store) {
        let store = Store::new(Arc::new(MemoryStore::new()));
        let api = LocalApi::new(store.clone(), Duration::ZERO);
        let capture = CaptureEngine::new(
            Box::new(SyntheticSource::new()),
            CaptureConfig {
                width: 16,
                height: 12,
            },
        );
        (Controller::new(Box::new(api), capture), store)
    }

    fn fill_registration(controller: &mut Controller, name: &str, employee_id: &str, password: &str) {
        controller.state.registration_form = RegistrationForm {
            name: name.to_string(),
            employee_id: employee_id.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            aadhaar_number: String::new(),
            phone: "1234567890".to_string(),
            password: password.to_string(),
        };
    }

    async fn register(controller: &mut Controller, name: &str, employee_id: &str, password: &str) {
        controller.show_register();
        fill_registration(controller, name, employee_id, password);
        controller.start_capture();
        controller.capture.capture_frame().unwrap();
        controller.submit_registration().await;
    }

    async fn login(controller: &mut Controller, employee_id: &str, password: &str) {
        controller.state.login_form.employee_id = employee_id.to_string();
        controller.state.login_form.password = password.to_string();
        controller.submit_login().await;
    }

    #[tokio::test]
    async fn test_register_login_mark_scenario() {
        let (mut controller, store) = fixture();

        register(&mut controller, "Asha", "E1", "pw1").await;
        assert_eq!(controller.state.view, View::Login);
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Registration successful! You can now login.")
        );
        assert_eq!(controller.state.registration_form, RegistrationForm::default());
        assert!(!controller.capture.is_streaming());

        login(&mut controller, "E1", "pw1").await;
        assert_eq!(controller.state.view, View::Dashboard);
        assert_eq!(controller.state.message.as_deref(), Some("Login successful!"));
        assert!(controller.state.attendance.is_empty());
        let account_id = controller.state.session.as_ref().unwrap().id;

        controller.start_capture();
        controller.mark_attendance().await;
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Attendance marked successfully!")
        );
        assert_eq!(controller.state.attendance.len(), 1);
        assert_eq!(controller.state.attendance[0].user_id, account_id);

        let stored = store.load_attendance();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, account_id);
    }

    #[tokio::test]
    async fn test_duplicate_employee_id_keeps_first_account() {
        let (mut controller, store) = fixture();

        register(&mut controller, "Asha", "E1", "pw1").await;
        let first = store.find_by_employee_id("E1").unwrap();

        register(&mut controller, "Ravi", "E1", "pw2").await;
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Registration failed: Employee ID already exists")
        );
        assert_eq!(controller.state.view, View::Register);

        let users = store.load_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].password, first.password);
        assert_eq!(users[0].face_image, first.face_image);
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_login() {
        let (mut controller, _store) = fixture();
        register(&mut controller, "Asha", "E1", "pw1").await;

        login(&mut controller, "E1", "nope").await;
        assert_eq!(controller.state.view, View::Login);
        assert!(controller.state.session.is_none());
        assert!(!controller.state.loading);
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Login failed: Invalid employee ID or password")
        );
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (mut controller, _store) = fixture();
        controller.submit_login().await;
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Please enter both Employee ID and Password")
        );
        assert!(!controller.state.loading);
    }

    #[tokio::test]
    async fn test_registration_requires_captured_face() {
        let (mut controller, store) = fixture();
        controller.show_register();
        fill_registration(&mut controller, "Asha", "E1", "pw1");

        controller.submit_registration().await;
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Please capture your face first")
        );
        assert!(store.load_users().is_empty());
    }

    #[tokio::test]
    async fn test_projection_is_exactly_the_users_records_newest_first() {
        let (mut controller, store) = fixture();
        register(&mut controller, "Asha", "E1", "pw1").await;
        register(&mut controller, "Ravi", "E2", "pw2").await;

        login(&mut controller, "E1", "pw1").await;
        controller.start_capture();
        controller.mark_attendance().await;
        controller.start_capture();
        controller.mark_attendance().await;
        controller.logout();

        login(&mut controller, "E2", "pw2").await;
        controller.start_capture();
        controller.mark_attendance().await;
        controller.logout();

        login(&mut controller, "E1", "pw1").await;
        let session_id = controller.state.session.as_ref().unwrap().id;
        let expected: Vec<_> = store
            .load_attendance()
            .into_iter()
            .filter(|r| r.user_id == session_id)
            .collect();
        assert_eq!(controller.state.attendance, expected);
        assert_eq!(controller.state.attendance.len(), 2);
        assert!(controller.state.attendance[0].id.0 > controller.state.attendance[1].id.0);

        // Nobody's records were clobbered along the way.
        assert_eq!(store.load_attendance().len(), 3);
    }

    #[tokio::test]
    async fn test_clear_all_data_requires_confirmation() {
        let (mut controller, store) = fixture();
        register(&mut controller, "Asha", "E1", "pw1").await;
        login(&mut controller, "E1", "pw1").await;
        controller.start_capture();
        controller.mark_attendance().await;

        controller.clear_all_data(false).await;
        assert_eq!(store.load_users().len(), 1);
        assert_eq!(controller.state.attendance.len(), 1);

        controller.clear_all_data(true).await;
        assert!(store.load_users().is_empty());
        assert!(store.load_attendance().is_empty());
        assert!(controller.state.attendance.is_empty());
        assert_eq!(
            controller.state.message.as_deref(),
            Some("All data cleared successfully")
        );
    }

    #[tokio::test]
    async fn test_mark_attendance_without_camera_sets_message() {
        let (mut controller, store) = fixture();
        register(&mut controller, "Asha", "E1", "pw1").await;
        login(&mut controller, "E1", "pw1").await;

        // Camera never started: the engine is idle, no payload.
        controller.mark_attendance().await;
        assert_eq!(
            controller.state.message.as_deref(),
            Some("Please capture your face for attendance")
        );
        assert!(store.load_attendance().is_empty());
    }

    #[tokio::test]
    async fn test_login_stamps_last_login() {
        let (mut controller, store) = fixture();
        register(&mut controller, "Asha", "E1", "pw1").await;
        assert!(store.find_by_employee_id("E1").unwrap().last_login.is_none());

        login(&mut controller, "E1", "pw1").await;
        assert!(store.find_by_employee_id("E1").unwrap().last_login.is_some());
    }

    #[tokio::test]
    async fn test_connectivity_and_message_are_display_state() {
        let (mut controller, _store) = fixture();
        assert!(controller.state.connectivity.is_online());

        controller.set_connectivity(Connectivity::Offline);
        assert!(!controller.state.connectivity.is_online());

        // Going offline gates nothing: registration still goes through.
        register(&mut controller, "Asha", "E1", "pw1").await;
        assert_eq!(controller.state.view, View::Login);

        controller.dismiss_message();
        assert!(controller.state.message.is_none());

        controller.start_capture();
        controller.stop_capture();
        assert!(!controller.capture.is_streaming());
    }

    #[tokio::test]
    async fn test_logout_resets_session_and_view() {
        let (mut controller, _store) = fixture();
        register(&mut controller, "Asha", "E1", "pw1").await;
        login(&mut controller, "E1", "pw1").await;
        controller.start_capture();

        controller.logout();
        assert!(controller.state.session.is_none());
        assert!(controller.state.attendance.is_empty());
        assert_eq!(controller.state.view, View::Login);
        assert!(!controller.capture.is_streaming());
    }
}
