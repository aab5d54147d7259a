use chrono::{TimeZone, Utc};

fn event(ts: &str, msg: &str) -> String {
    format!("{ts} | Source: vpn_apr09.txt | ERROR | {msg}")
}

#[test]
fn events_within_the_same_minute_share_a_bucket() {
    let events = vec![
        event("2024-04-09 10:00:05.100000", "early"),
        event("2024-04-09 10:00:59.999999", "late"),
        event("2024-04-09 10:01:00.000000", "next minute"),
    ];
    let buckets = logsift::dedup::bucket_events(&events);
    assert_eq!(buckets.len(), 2);
    let first = Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 4, 9, 10, 1, 0).unwrap();
    assert_eq!(buckets[&first].len(), 2);
    assert_eq!(buckets[&second].len(), 1);
}

#[test]
fn exact_duplicates_collapse_to_one_entry_per_bucket() {
    let e = event("2024-04-09 10:00:05.100000", "repeated");
    let buckets = logsift::dedup::bucket_events(&[e.clone(), e.clone(), e.clone()]);
    assert_eq!(buckets.len(), 1);
    let bucket = buckets.values().next().unwrap();
    assert_eq!(bucket.len(), 1);
    assert!(bucket.contains(&e));
}

#[test]
fn bucketing_twice_yields_the_same_result() {
    let events = vec![
        event("2024-04-09 10:00:05.100000", "a"),
        event("2024-04-09 10:02:30.000000", "b"),
        event("2024-04-09 10:00:05.100000", "a"),
    ];
    let once = logsift::dedup::bucket_events(&events);
    let twice = logsift::dedup::bucket_events(&events);
    assert_eq!(once, twice);
}

#[test]
fn unparseable_timestamps_are_skipped_without_aborting() {
    let events = vec![
        "garbage | Source: a.txt | ERROR | no timestamp here".to_string(),
        event("2024-04-09 10:00:05.100000", "still processed"),
    ];
    let buckets = logsift::dedup::bucket_events(&events);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets.values().next().unwrap().len(), 1);
}

#[test]
fn buckets_iterate_in_ascending_time_order() {
    let events = vec![
        event("2024-04-09 10:05:00.000000", "later"),
        event("2024-04-09 10:00:00.000000", "earlier"),
        event("2024-04-09 10:03:00.000000", "middle"),
    ];
    let buckets = logsift::dedup::bucket_events(&events);
    let keys: Vec<_> = buckets.keys().copied().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn reformatted_event_recovers_the_same_bucket_key() {
    // Bucketing is a pure function of the timestamp: parsing a raw line,
    // rendering it and re-extracting the timestamp lands in the same bucket
    // as the original timestamp text.
    let raw = "2024-04-09 10:00:42.654321 | vpn01 | ERROR | tunnel | 7 | handshake failed";
    let parsed = logsift::parser::parse_line(raw).unwrap();
    let formatted = logsift::parser::format_event(&parsed, "vpn_apr09.txt");
    let from_event = logsift::dedup::event_timestamp(&formatted).unwrap();
    let expected = Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap();
    assert_eq!(logsift::dedup::floor_to_bucket(from_event), expected);
}

#[test]
fn subsecond_and_second_components_are_zeroed_in_bucket_keys() {
    let buckets = logsift::dedup::bucket_events(&[event("2024-04-09 23:59:59.999999", "edge")]);
    let key = *buckets.keys().next().unwrap();
    assert_eq!(key, Utc.with_ymd_and_hms(2024, 4, 9, 23, 59, 0).unwrap());
}
