//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_creates_current_timestamp() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();
        assert!(*ts.as_datetime() >= before);
        assert!(*ts.as_datetime() <= after);
    }

    #[test]
    fn from_datetime_preserves_value() {
        let dt = Utc::now();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.as_datetime(), &dt);
    }

    #[test]
    fn is_before_and_is_after_work() {
        let earlier = Timestamp::from_datetime(Utc::now());
        let later = Timestamp::from_datetime(*earlier.as_datetime() + Duration::seconds(5));
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(!earlier.is_after(&later));
    }

    #[test]
    fn duration_since_computes_difference() {
        let earlier = Timestamp::from_datetime(Utc::now());
        let later = Timestamp::from_datetime(*earlier.as_datetime() + Duration::seconds(30));
        assert_eq!(later.duration_since(&earlier), Duration::seconds(30));
    }

    #[test]
    fn displays_as_rfc3339() {
        let ts = Timestamp::now();
        let rendered = format!("{}", ts);
        assert!(rendered.contains('T'));
    }
}
