//! Domain model structs persisted in the local collections.
//!
//! Field names serialize in camelCase and timestamps as RFC 3339 strings so
//! the stored blobs keep the exact shape of the original deployment's data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rollcall_shared::{AttendanceStatus, EncodedImage, RecordId, UserId};

// ---------------------------------------------------------------------------
// UserAccount
// ---------------------------------------------------------------------------

/// A registered account.  Created on registration, mutated only to stamp
/// `last_login`, removed only by a bulk clear.
///
/// `employee_id` is the unique lookup key across all accounts.  The password
/// is stored as entered: the stored blob is part of the external interface
/// and carries no hashing (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Millisecond-timestamp id, unique and monotonic.
    pub id: UserId,
    /// Full name as entered at registration.
    pub name: String,
    /// Employee id, unique across accounts.
    pub employee_id: String,
    pub email: String,
    /// Optional 12-digit aadhaar number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    pub phone: String,
    pub password: String,
    /// Face still captured during registration.
    pub face_image: EncodedImage,
    pub created_at: DateTime<Utc>,
    /// Stamped on every successful login; absent until the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// AttendanceRecord
// ---------------------------------------------------------------------------

/// One check-in.  Append-only; newest first in storage.  Nothing prevents
/// several records for the same account on the same day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Millisecond-timestamp id, unique and monotonic.
    pub id: RecordId,
    /// Id of the account that checked in.
    pub user_id: UserId,
    /// Denormalized from the account at creation time.
    pub user_name: String,
    /// Denormalized from the account at creation time.
    pub employee_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: AttendanceStatus,
    /// Face still captured when attendance was marked.
    pub face_image: EncodedImage,
}
