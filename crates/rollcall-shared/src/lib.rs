//! # rollcall-shared
//!
//! Types shared by every Rollcall crate: typed record identifiers, the
//! encoded image payload handed around by the capture and storage layers,
//! connectivity state, monotonic id allocation, and the input-validation
//! error taxonomy.

pub mod error;
pub mod ids;
pub mod types;

pub use error::ValidationError;
pub use ids::IdAllocator;
pub use types::*;
