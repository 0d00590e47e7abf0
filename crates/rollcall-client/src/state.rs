//! Application state owned by the view controller.
//!
//! The state is a plain struct mutated by one logical actor; there is no
//! interior locking.  The attendance projection is the logged-in account's
//! slice of the stored collection and must be kept consistent with storage
//! on every mutation.

use rollcall_shared::{Connectivity, ValidationError};
use rollcall_store::{AttendanceRecord, UserAccount};

/// The active view.  Exhaustive matches everywhere -- view dispatch is
/// never done on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Dashboard,
}

/// Login form buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub employee_id: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.employee_id.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Registration form buffer.  All fields except the aadhaar number are
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub employee_id: String,
    pub email: String,
    pub aadhaar_number: String,
    pub phone: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            &self.name,
            &self.employee_id,
            &self.email,
            &self.phone,
            &self.password,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingRequiredFields);
        }
        if !self.aadhaar_number.is_empty()
            && (self.aadhaar_number.len() != 12
                || !self.aadhaar_number.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(ValidationError::InvalidAadhaar);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    /// The view being presented.
    pub view: View,

    /// The logged-in account.  In memory only, lost on restart.
    pub session: Option<UserAccount>,

    /// The logged-in account's attendance records, most recent first.
    pub attendance: Vec<AttendanceRecord>,

    pub login_form: LoginForm,
    pub registration_form: RegistrationForm,

    /// Last success or error string, shown inline.
    pub message: Option<String>,

    /// True exactly while a request is in flight; submit actions refuse to
    /// start while set.
    pub loading: bool,

    /// Mirrored from environment online/offline events.  Display only.
    pub connectivity: Connectivity,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: View::default(),
            session: None,
            attendance: Vec::new(),
            login_form: LoginForm::default(),
            registration_form: RegistrationForm::default(),
            message: None,
            loading: false,
            connectivity: Connectivity::Online,
        }
    }

    /// The `n` most recent check-ins, for the dashboard's recent panel.
    pub fn recent_attendance(&self, n: usize) -> &[AttendanceRecord] {
        &self.attendance[..self.attendance.len().min(n)]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
