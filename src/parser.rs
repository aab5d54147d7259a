use crate::ingest::LogFile;

/// Minimum number of pipe-delimited fields for a line to count as an event.
pub const MIN_FIELDS: usize = 6;

/// Level marking an error event.
pub const ERROR_LEVEL: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Splits a pipe-delimited log line into timestamp, level and message.
///
/// Lines with fewer than six fields are not valid events and yield `None`;
/// callers skip them without raising an error. Fields 1, 3 and 4 exist in
/// the source format but carry nothing the analysis needs, so only indexes
/// 0, 2 and 5 are extracted. Fields past index 5 are ignored.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }
    Some(ParsedLine {
        timestamp: parts[0].trim().to_string(),
        level: parts[2].trim().to_string(),
        message: parts[5].trim().to_string(),
    })
}

/// Canonical rendering of an event. Exact string equality over this form is
/// the unit of deduplication and storage downstream.
pub fn format_event(parsed: &ParsedLine, source_file: &str) -> String {
    format!(
        "{} | Source: {} | {} | {}",
        parsed.timestamp, source_file, parsed.level, parsed.message
    )
}

/// Collects formatted `ERROR` events across a set of ingested files, in
/// file/line order.
pub fn collect_error_events(files: &[LogFile]) -> Vec<String> {
    let mut events = Vec::new();
    for file in files {
        for line in &file.lines {
            if let Some(parsed) = parse_line(line) {
                if parsed.level == ERROR_LEVEL {
                    events.push(format_event(&parsed, &file.name));
                }
            }
        }
    }
    events
}
