use chrono::Utc;

/// Allocates record identifiers as millisecond timestamps.
///
/// The original scheme (wall clock at creation time) collides when two
/// records are created within the same millisecond, so the allocator bumps
/// past the previously issued id: `max(now_ms, last + 1)`.  Ids are strictly
/// monotonic for the lifetime of the allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Issue the next id.
    pub fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}
