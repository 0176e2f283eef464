//! Append-only log of solve runs.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::semicolon_writer;
use crate::error::{OprError, OprResult};
use crate::model::Cost;

/// One line of the run log: `tasks;operators;seconds;makespan`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunRecord {
    /// Identifier of the task input.
    pub tasks_input: String,
    /// Identifier of the operator input.
    pub operators_input: String,
    pub elapsed: Duration,
    pub makespan: Cost,
}

/// Semicolon-separated run log that only ever grows.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `records`, creating the file if needed.
    pub fn append(&self, records: &[RunRecord]) -> OprResult<()> {
        self.try_append(records)
            .map_err(|e| OprError::io(&self.path, e))
    }

    fn try_append(&self, records: &[RunRecord]) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = semicolon_writer(file);
        for record in records {
            let seconds = format!("{:.3}", record.elapsed.as_secs_f64());
            let makespan = record.makespan.to_string();
            writer.write_record([
                record.tasks_input.as_str(),
                record.operators_input.as_str(),
                seconds.as_str(),
                makespan.as_str(),
            ])?;
        }
        writer.flush()
    }

    /// Reads every record back.
    pub fn read(&self) -> OprResult<Vec<RunRecord>> {
        self.try_read().map_err(|e| OprError::io(&self.path, e))
    }

    fn try_read(&self) -> io::Result<Vec<RunRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.len() != 4 {
                return Err(invalid(format!("expected 4 fields, got {}", row.len())));
            }
            let seconds: f64 = row[2].parse().map_err(|e| invalid(format!("{e}")))?;
            let makespan: Cost = row[3].parse().map_err(|e| invalid(format!("{e}")))?;
            records.push(RunRecord {
                tasks_input: row[0].to_string(),
                operators_input: row[1].to_string(),
                elapsed: Duration::try_from_secs_f64(seconds)
                    .map_err(|e| invalid(format!("{e}")))?,
                makespan,
            });
        }
        Ok(records)
    }
}

fn invalid(detail: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(makespan: Cost, millis: u64) -> RunRecord {
        RunRecord {
            tasks_input: "0".into(),
            operators_input: "2".into(),
            elapsed: Duration::from_millis(millis),
            makespan,
        }
    }

    #[test]
    fn test_append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("output.csv"));

        log.append(&[record(120, 1500)]).unwrap();
        log.append(&[record(118, 2250), record(121, 10)]).unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(text, "0;2;1.500;120\n0;2;2.250;118\n0;2;0.010;121\n");

        let records = log.read().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].makespan, 118);
        assert_eq!(records[1].elapsed, Duration::from_millis(2250));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("absent.csv"));
        assert!(matches!(log.read(), Err(OprError::Io { .. })));
    }

    #[test]
    fn test_read_rejects_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "0;2;fast;120\n").unwrap();
        assert!(RunLog::new(path).read().is_err());
    }
}
