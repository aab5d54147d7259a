use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("reference samples file not found: {0}")]
    MissingReferenceFile(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One ingested log file: its bare file name and its lines, verbatim minus
/// the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub name: String,
    pub lines: Vec<String>,
}

// On-disk form of the reference sample set: a bare JSON array of strings,
// so the file stays interchangeable with other tooling.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct SampleFile(Vec<String>);

/// Reads every `*.txt` file in `dir`, sorted by file name so downstream
/// output is stable across platforms. Other entries are ignored.
pub fn read_log_dir(dir: &Path) -> Result<Vec<LogFile>, IngestError> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".txt") && entry.file_type()?.is_file() {
            names.push(name);
        }
    }
    names.sort();

    let mut files = Vec::with_capacity(names.len());
    for name in names {
        let f = fs::File::open(dir.join(&name))?;
        let reader = BufReader::new(f);
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        files.push(LogFile { name, lines });
    }
    Ok(files)
}

/// Loads the persisted reference sample set.
///
/// A missing file is fatal for classification, so it gets its own variant
/// instead of folding into the generic io error.
pub fn load_reference_samples(path: &Path) -> Result<Vec<String>, IngestError> {
    if !path.exists() {
        return Err(IngestError::MissingReferenceFile(
            path.display().to_string(),
        ));
    }
    let data = fs::read_to_string(path)?;
    let SampleFile(samples) = serde_json::from_str(&data)?;
    Ok(samples)
}

/// Persists the reference sample set as a pretty-printed JSON array.
pub fn save_reference_samples(path: &Path, samples: &[String]) -> Result<(), IngestError> {
    let data = serde_json::to_string_pretty(&SampleFile(samples.to_vec()))?;
    fs::write(path, data)?;
    Ok(())
}
