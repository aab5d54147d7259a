use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Timestamp layout at the head of a formatted event string.
const EVENT_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Bucket width for grouping error events.
pub const BUCKET_SECONDS: i64 = 60;

/// Buckets keyed by minute boundary. `BTreeMap` keeps emission ascending by
/// timestamp; `BTreeSet` collapses exact-text duplicates and keeps in-bucket
/// iteration deterministic.
pub type BucketedEvents = BTreeMap<DateTime<Utc>, BTreeSet<String>>;

/// Groups formatted error events into 60-second buckets, removing
/// exact-duplicate event strings within each bucket.
///
/// Events whose leading timestamp does not parse are logged and skipped;
/// the run continues.
pub fn bucket_events(events: &[String]) -> BucketedEvents {
    let mut buckets: BucketedEvents = BTreeMap::new();
    for event in events {
        match event_timestamp(event) {
            Some(ts) => {
                buckets
                    .entry(floor_to_bucket(ts))
                    .or_default()
                    .insert(event.clone());
            }
            None => warn!(%event, "skipping event with unparseable timestamp"),
        }
    }
    buckets
}

/// Re-extracts the timestamp substring before the first `|` and parses it
/// with microsecond precision.
pub fn event_timestamp(event: &str) -> Option<DateTime<Utc>> {
    let head = event.split('|').next().unwrap_or("").trim();
    NaiveDateTime::parse_from_str(head, EVENT_TS_FORMAT)
        .ok()
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Floors a timestamp to its 60-second boundary, zeroing the within-minute
/// seconds and the subsecond component.
pub fn floor_to_bucket(t: DateTime<Utc>) -> DateTime<Utc> {
    let ts = t.timestamp();
    let floored = ts - ts.rem_euclid(BUCKET_SECONDS);
    Utc.timestamp_opt(floored, 0).unwrap()
}
