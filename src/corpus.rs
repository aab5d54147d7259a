use crate::ingest::LogFile;
use crate::parser;
use std::collections::BTreeSet;

/// Levels whose lines count as known-good reference samples.
pub const SUCCESS_LEVELS: [&str; 2] = ["EVENT", "INFO"];

/// Scans ingested files for lines marking successful activity, tags each
/// with its source file and deduplicates by exact text.
///
/// The level match is exact and case-sensitive: `info` or `INFORMATIONAL`
/// do not qualify. The raw line text is kept (trimmed), not the parsed
/// fields, so samples stay comparable with candidate lines later on.
pub fn extract_success_samples(files: &[LogFile]) -> BTreeSet<String> {
    let mut samples = BTreeSet::new();
    for file in files {
        for line in &file.lines {
            if let Some(parsed) = parser::parse_line(line) {
                if SUCCESS_LEVELS.contains(&parsed.level.as_str()) {
                    samples.insert(format!("{} | Source: {}", line.trim(), file.name));
                }
            }
        }
    }
    samples
}
