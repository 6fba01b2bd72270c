//! Time-range filtering of events.
//!
//! Window bounds are given in seconds on the command line and converted
//! once to the recording's nanosecond resolution. An event passes when
//! either of its endpoints falls inside the inclusive window.

/// Inclusive time window in nanoseconds
///
/// **Public** - configured once, applied to every event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start_nanos: i64,
    end_nanos: i64,
}

const NANOS_PER_SEC: i64 = 1_000_000_000;

impl TimeRange {
    /// The unbounded window; filtering is a no-op
    pub fn unbounded() -> Self {
        Self {
            start_nanos: i64::MIN,
            end_nanos: i64::MAX,
        }
    }

    /// Build a window from optional second-resolution bounds
    pub fn from_seconds(start: Option<i64>, end: Option<i64>) -> Self {
        Self {
            start_nanos: start
                .map(|s| s.saturating_mul(NANOS_PER_SEC))
                .unwrap_or(i64::MIN),
            end_nanos: end
                .map(|s| s.saturating_mul(NANOS_PER_SEC))
                .unwrap_or(i64::MAX),
        }
    }

    /// Whether an event overlaps the window
    ///
    /// True when the event's start or end timestamp lies in
    /// `[start, end]`, both bounds inclusive.
    pub fn contains_event(&self, event_start: i64, event_end: i64) -> bool {
        (event_start >= self.start_nanos && event_start <= self.end_nanos)
            || (event_end >= self.start_nanos && event_end <= self.end_nanos)
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::unbounded()
    }
}
