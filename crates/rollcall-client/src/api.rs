//! The request/response boundary between the view controller and
//! persistence.
//!
//! [`LocalApi`] is the store-backed implementation: every call sleeps for
//! the configured latency (standing in for a network round-trip) and then
//! answers synchronously from the local collections.  A real backend
//! replaces this implementation without touching the controller.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use rollcall_shared::{
    AttendanceStatus, EncodedImage, IdAllocator, RecordId, UserId, ValidationError,
};
use rollcall_store::{AttendanceRecord, Store, UserAccount};

/// Failures surfaced through the api port.  Every variant maps to an inline
/// user-facing message; none of them mutate state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Employee ID already exists")]
    DuplicateEmployeeId,

    #[error("Invalid employee ID or password")]
    InvalidCredentials,

    #[error("No active session")]
    NoSession,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub employee_id: String,
    pub email: String,
    pub aadhaar_number: Option<String>,
    pub phone: String,
    pub password: String,
    pub face_image: EncodedImage,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub employee_id: String,
    pub password: String,
}

/// Successful login: the account plus its attendance projection, most
/// recent first.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserAccount,
    pub attendance: Vec<AttendanceRecord>,
}

/// Request/response port the controller calls through.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<UserAccount, RequestError>;

    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, RequestError>;

    async fn mark_attendance(
        &self,
        user: &UserAccount,
        face_image: EncodedImage,
    ) -> Result<AttendanceRecord, RequestError>;

    /// Erase both collections.  Immediate -- no simulated latency.
    async fn clear_all(&self);
}

/// Store-backed api with simulated request latency.
pub struct LocalApi {
    store: Store,
    latency: Duration,
    ids: Mutex<IdAllocator>,
}

impl LocalApi {
    pub fn new(store: Store, latency: Duration) -> Self {
        Self {
            store,
            latency,
            ids: Mutex::new(IdAllocator::new()),
        }
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn next_id(&self) -> i64 {
        self.ids.lock().await.next()
    }
}

#[async_trait]
impl AttendanceApi for LocalApi {
    async fn register(&self, request: RegisterRequest) -> Result<UserAccount, RequestError> {
        self.delay().await;

        if self.store.find_by_employee_id(&request.employee_id).is_some() {
            return Err(RequestError::DuplicateEmployeeId);
        }

        let account = UserAccount {
            id: UserId(self.next_id().await),
            name: request.name,
            employee_id: request.employee_id,
            email: request.email,
            aadhaar_number: request.aadhaar_number,
            phone: request.phone,
            password: request.password,
            face_image: request.face_image,
            created_at: Utc::now(),
            last_login: None,
        };

        let mut users = self.store.load_users();
        users.push(account.clone());
        self.store.save_users(&users);

        info!(employee_id = %account.employee_id, id = %account.id, "account registered");
        Ok(account)
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, RequestError> {
        self.delay().await;

        let mut users = self.store.load_users();
        let matched = users
            .iter_mut()
            .find(|u| u.employee_id == request.employee_id && u.password == request.password)
            .ok_or(RequestError::InvalidCredentials)?;

        matched.last_login = Some(Utc::now());
        let user = matched.clone();
        self.store.save_users(&users);

        let mut attendance: Vec<AttendanceRecord> = self
            .store
            .load_attendance()
            .into_iter()
            .filter(|r| r.user_id == user.id)
            .collect();
        attendance.sort_by(|a, b| b.id.0.cmp(&a.id.0));

        info!(employee_id = %user.employee_id, records = attendance.len(), "login");
        Ok(LoginOutcome { user, attendance })
    }

    async fn mark_attendance(
        &self,
        user: &UserAccount,
        face_image: EncodedImage,
    ) -> Result<AttendanceRecord, RequestError> {
        self.delay().await;

        let record = AttendanceRecord {
            id: RecordId(self.next_id().await),
            user_id: user.id,
            user_name: user.name.clone(),
            employee_id: user.employee_id.clone(),
            timestamp: Utc::now(),
            status: AttendanceStatus::Present,
            face_image,
        };

        // Prepend to the FULL stored collection; the projection handed to
        // the controller is derived from it, never the other way around.
        let mut all = self.store.load_attendance();
        all.insert(0, record.clone());
        self.store.save_attendance(&all);

        info!(employee_id = %record.employee_id, id = %record.id, "attendance marked");
        Ok(record)
    }

    async fn clear_all(&self) {
        self.store.clear_all();
        info!("all stored data cleared");
    }
}
