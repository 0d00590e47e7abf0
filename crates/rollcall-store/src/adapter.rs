//! Typed adapter over the raw key/value store.
//!
//! Owns the serialized form of both collections.  Reads fail soft: a blob
//! that is missing, unreadable, or unparsable loads as an empty collection
//! and the error is logged.  Writes fail soft as well -- logged, swallowed,
//! not retried.  There is no atomicity across the two collections; the
//! single-actor model makes read-modify-write safe within one process,
//! last-writer-wins otherwise.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::KvStore;
use crate::models::{AttendanceRecord, UserAccount};

/// Storage key for the account collection.
pub const USERS_KEY: &str = "attendanceUsers";
/// Storage key for the attendance collection.
pub const ATTENDANCE_KEY: &str = "attendanceRecords";

/// Typed access to the two persisted collections.
#[derive(Clone)]
pub struct Store {
    kv: Arc<dyn KvStore>,
}

impl Store {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn load_users(&self) -> Vec<UserAccount> {
        self.load(USERS_KEY)
    }

    pub fn save_users(&self, users: &[UserAccount]) {
        self.save(USERS_KEY, users);
    }

    pub fn load_attendance(&self) -> Vec<AttendanceRecord> {
        self.load(ATTENDANCE_KEY)
    }

    pub fn save_attendance(&self, records: &[AttendanceRecord]) {
        self.save(ATTENDANCE_KEY, records);
    }

    /// Find the account with exactly this employee id.
    ///
    /// Linear scan over the stored collection, O(n) per call.  Fine at the
    /// scale of one device's account list; no index is kept.
    pub fn find_by_employee_id(&self, employee_id: &str) -> Option<UserAccount> {
        self.load_users()
            .into_iter()
            .find(|u| u.employee_id == employee_id)
    }

    /// Remove both collections.
    pub fn clear_all(&self) {
        for key in [USERS_KEY, ATTENDANCE_KEY] {
            if let Err(e) = self.kv.remove(key) {
                tracing::error!(key, error = %e, "failed to clear collection");
            }
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let text = match self.kv.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read collection, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(seq) => seq,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to parse collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, seq: &[T]) {
        let text = match serde_json::to_string(seq) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to serialize collection");
                return;
            }
        };
        if let Err(e) = self.kv.set(key, &text) {
            tracing::error!(key, error = %e, "failed to write collection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Utc;
    use rollcall_shared::{AttendanceStatus, EncodedImage, RecordId, UserId};

    fn store() -> (Store, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        (Store::new(kv.clone()), kv)
    }

    fn account(id: i64, employee_id: &str) -> UserAccount {
        UserAccount {
            id: UserId(id),
            name: "Asha".to_string(),
            employee_id: employee_id.to_string(),
            email: "a@x.com".to_string(),
            aadhaar_number: None,
            phone: "1234567890".to_string(),
            password: "pw1".to_string(),
            face_image: EncodedImage("data:image/jpeg;base64,AAAA".to_string()),
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn record(id: i64, user_id: i64) -> AttendanceRecord {
        AttendanceRecord {
            id: RecordId(id),
            user_id: UserId(user_id),
            user_name: "Asha".to_string(),
            employee_id: "E1".to_string(),
            timestamp: Utc::now(),
            status: AttendanceStatus::Present,
            face_image: EncodedImage("data:image/jpeg;base64,AAAA".to_string()),
        }
    }

    #[test]
    fn empty_store_loads_empty_collections() {
        let (store, _) = store();
        assert!(store.load_users().is_empty());
        assert!(store.load_attendance().is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let (store, _) = store();
        let users = vec![account(1, "E1"), account(2, "E2")];
        store.save_users(&users);
        assert_eq!(store.load_users(), users);

        let records = vec![record(3, 1)];
        store.save_attendance(&records);
        assert_eq!(store.load_attendance(), records);
    }

    #[test]
    fn corrupt_blob_loads_as_empty() {
        let (store, kv) = store();
        kv.set(USERS_KEY, "{not json").unwrap();
        assert!(store.load_users().is_empty());
    }

    #[test]
    fn find_by_employee_id_is_exact_match() {
        let (store, _) = store();
        store.save_users(&[account(1, "E1"), account(2, "E10")]);

        assert_eq!(store.find_by_employee_id("E1").unwrap().id, UserId(1));
        assert_eq!(store.find_by_employee_id("E10").unwrap().id, UserId(2));
        assert!(store.find_by_employee_id("e1").is_none());
        assert!(store.find_by_employee_id("E").is_none());
    }

    #[test]
    fn clear_all_removes_both_collections() {
        let (store, kv) = store();
        store.save_users(&[account(1, "E1")]);
        store.save_attendance(&[record(2, 1)]);

        store.clear_all();
        assert!(store.load_users().is_empty());
        assert!(store.load_attendance().is_empty());
        assert_eq!(kv.get(USERS_KEY).unwrap(), None);
        assert_eq!(kv.get(ATTENDANCE_KEY).unwrap(), None);
    }
}
