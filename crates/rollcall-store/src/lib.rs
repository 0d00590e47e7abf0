//! # rollcall-store
//!
//! Local persistence for the Rollcall application: two named collections
//! (`attendanceUsers`, `attendanceRecords`) serialized as JSON text blobs
//! under stable keys, the analogue of browser local storage.
//!
//! Storage access goes through the [`KvStore`] capability trait so the rest
//! of the application never touches the filesystem directly; tests inject a
//! [`MemoryStore`] fake.  The typed [`Store`] adapter on top fails soft: a
//! blob that cannot be read or parsed loads as an empty collection, and a
//! failed write is logged and swallowed.

pub mod adapter;
pub mod kv;
pub mod models;

mod error;

pub use adapter::{Store, ATTENDANCE_KEY, USERS_KEY};
pub use error::StoreError;
pub use kv::{FileStore, KvStore, MemoryStore};
pub use models::*;
