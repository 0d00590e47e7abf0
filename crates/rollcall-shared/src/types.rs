use serde::{Deserialize, Serialize};

/// Identifier of a registered account.  Millisecond timestamp at creation,
/// strictly monotonic per process (see [`crate::ids::IdAllocator`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an attendance record.  Same allocation scheme as [`UserId`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A captured still image, encoded as a `data:image/jpeg;base64,…` URI.
///
/// Stored verbatim inside accounts and attendance records; the content is
/// never decoded or compared anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EncodedImage(pub String);

impl EncodedImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for EncodedImage {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Status recorded when attendance is marked.  The only variant the system
/// ever writes; kept as an enum so the stored value stays a closed set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
}

/// Environment connectivity, mirrored from online/offline events.
/// Display only -- no operation is gated on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(self) -> bool {
        self == Connectivity::Online
    }
}
