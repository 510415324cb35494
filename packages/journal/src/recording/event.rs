// packages/journal/src/recording/event.rs
//! Event records and their rendered line form
//!
//! A record renders as `"<label> at <timestamp>"` where the timestamp is
//! always UTC, `YYYY-MM-DD HH:MM:SS` with optional milliseconds. Rendering
//! never consults the host locale or timezone, so lines written across
//! restarts sort and compare consistently.

use chrono::{DateTime, Utc};
use std::fmt;

const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MILLIS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Resolution of the rendered timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPrecision {
    /// `YYYY-MM-DD HH:MM:SS`
    Seconds,

    /// `YYYY-MM-DD HH:MM:SS.mmm`
    Millis,
}

impl TimestampPrecision {
    fn pattern(self) -> &'static str {
        match self {
            TimestampPrecision::Seconds => SECONDS_FORMAT,
            TimestampPrecision::Millis => MILLIS_FORMAT,
        }
    }

    /// Length of a rendered timestamp in bytes
    pub fn rendered_len(self) -> usize {
        match self {
            TimestampPrecision::Seconds => 19,
            TimestampPrecision::Millis => 23,
        }
    }
}

/// A labeled, timestamped occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    label: String,
    timestamp: DateTime<Utc>,
    precision: TimestampPrecision,
}

impl EventRecord {
    /// Capture an event observed now
    pub fn now(label: impl Into<String>, precision: TimestampPrecision) -> Self {
        Self::at(label, Utc::now(), precision)
    }

    /// Build a record for an explicit instant
    pub fn at(
        label: impl Into<String>,
        timestamp: DateTime<Utc>,
        precision: TimestampPrecision,
    ) -> Self {
        Self {
            label: label.into(),
            timestamp,
            precision,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn precision(&self) -> TimestampPrecision {
        self.precision
    }

    /// Timestamp in the fixed UTC text form
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(self.precision.pattern()).to_string()
    }

    /// Rendered line without terminator
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}",
            self.label,
            self.timestamp.format(self.precision.pattern())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn assert_utc_pattern(ts: &str, precision: TimestampPrecision) {
        let bytes = ts.as_bytes();
        assert_eq!(bytes.len(), precision.rendered_len(), "bad length: {ts}");
        for (i, b) in bytes.iter().enumerate() {
            match i {
                4 | 7 => assert_eq!(*b, b'-', "{ts}"),
                10 => assert_eq!(*b, b' ', "{ts}"),
                13 | 16 => assert_eq!(*b, b':', "{ts}"),
                19 => assert_eq!(*b, b'.', "{ts}"),
                _ => assert!(b.is_ascii_digit(), "{ts}"),
            }
        }
    }

    #[test]
    fn test_render_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(42);
        let record = EventRecord::at("Button Clicked", ts, TimestampPrecision::Millis);
        assert_eq!(record.render(), "Button Clicked at 2024-03-09 07:05:01.042");
    }

    #[test]
    fn test_render_seconds() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        let record = EventRecord::at("Screen Touched", ts, TimestampPrecision::Seconds);
        assert_eq!(record.render(), "Screen Touched at 2023-12-31 23:59:59");
    }

    #[test]
    fn test_offset_input_is_normalized_to_utc() {
        let offset = chrono::FixedOffset::east_opt(5 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
        let record = EventRecord::at(
            "Network connectivity changed. Connected.",
            local.with_timezone(&Utc),
            TimestampPrecision::Seconds,
        );
        assert_eq!(record.formatted_timestamp(), "2023-12-31 22:00:00");
    }

    #[test]
    fn test_now_matches_pattern() {
        let record = EventRecord::now("x", TimestampPrecision::Millis);
        assert_utc_pattern(&record.formatted_timestamp(), TimestampPrecision::Millis);
    }

    proptest! {
        #[test]
        fn prop_timestamp_pattern_holds(
            millis in 0i64..4_102_444_800_000i64,
            label in ".*",
            precise in any::<bool>(),
        ) {
            let precision = if precise {
                TimestampPrecision::Millis
            } else {
                TimestampPrecision::Seconds
            };
            let ts = DateTime::from_timestamp_millis(millis).unwrap();
            let record = EventRecord::at(label.clone(), ts, precision);

            let rendered = record.render();
            let suffix = rendered.strip_prefix(label.as_str()).unwrap();
            let stamp = suffix.strip_prefix(" at ").unwrap();
            assert_utc_pattern(stamp, precision);
        }

        #[test]
        fn prop_rendered_order_follows_time(a in 0i64..4_102_444_800_000i64, b in 0i64..4_102_444_800_000i64) {
            let ra = EventRecord::at("e", DateTime::from_timestamp_millis(a).unwrap(), TimestampPrecision::Millis);
            let rb = EventRecord::at("e", DateTime::from_timestamp_millis(b).unwrap(), TimestampPrecision::Millis);
            prop_assert_eq!(a.cmp(&b), ra.formatted_timestamp().cmp(&rb.formatted_timestamp()));
        }
    }
}
