//! Distance matrix cache.
//!
//! Computing task-to-task travel times from a room graph is slow for large
//! inputs, so the matrix can be stored as whitespace-separated rows of
//! integers and reloaded on the next run.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{OprError, OprResult};
use crate::model::Cost;

/// Writes `matrix` to `path`, one row per line.
pub fn save(path: impl AsRef<Path>, matrix: &[Vec<Cost>]) -> OprResult<()> {
    let path = path.as_ref();
    write_rows(path, matrix).map_err(|e| OprError::io(path, e))
}

fn write_rows(path: &Path, matrix: &[Vec<Cost>]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in matrix {
        let line: Vec<String> = row.iter().map(Cost::to_string).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    out.flush()
}

/// Reads a matrix written by [`save`]. Blank lines are skipped.
pub fn load(path: impl AsRef<Path>) -> OprResult<Vec<Vec<Cost>>> {
    let path = path.as_ref();
    read_rows(path).map_err(|e| OprError::io(path, e))
}

fn read_rows(path: &Path) -> io::Result<Vec<Vec<Cost>>> {
    let reader = BufReader::new(File::open(path)?);
    let mut matrix = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|v| {
                v.parse::<Cost>()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })
            .collect::<io::Result<Vec<_>>>()?;
        matrix.push(row);
    }
    Ok(matrix)
}

/// Loads the `size` x `size` matrix cached at `path`, or computes and caches it.
///
/// A missing, unreadable or wrongly shaped cache falls back to `compute`.
/// Failing to write the cache afterwards is logged and otherwise ignored.
pub fn load_or_compute<F>(path: impl AsRef<Path>, size: usize, compute: F) -> Vec<Vec<Cost>>
where
    F: FnOnce() -> Vec<Vec<Cost>>,
{
    let path = path.as_ref();
    match load(path) {
        Ok(matrix) if is_square(&matrix, size) => {
            info!(path = %path.display(), size, "using cached distance matrix");
            return matrix;
        }
        Ok(matrix) => warn!(
            path = %path.display(),
            rows = matrix.len(),
            expected = size,
            "cached distance matrix has the wrong shape, recomputing"
        ),
        Err(err) => warn!(%err, "distance matrix cache unavailable, recomputing"),
    }

    let matrix = compute();
    if let Err(err) = save(path, &matrix) {
        warn!(%err, "could not save distance matrix cache");
    }
    matrix
}

fn is_square(matrix: &[Vec<Cost>], size: usize) -> bool {
    matrix.len() == size && matrix.iter().all(|row| row.len() == size)
}
