use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewFileError {
    #[error("failed to open review file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read line {line} of {path}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

pub fn read_review_lines(
    path: &Path,
    limit: Option<usize>,
) -> Result<Vec<String>, ReviewFileError> {
    let file = File::open(path).map_err(|source| ReviewFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    collect_review_lines(BufReader::new(file), limit).map_err(|(line, source)| {
        ReviewFileError::Read {
            path: path.to_path_buf(),
            line,
            source,
        }
    })
}

/// Trailing whitespace is stripped and blank lines are skipped. `limit` caps
/// the number of reviews returned, not the number of lines read.
pub fn collect_review_lines(
    reader: impl BufRead,
    limit: Option<usize>,
) -> Result<Vec<String>, (usize, std::io::Error)> {
    let mut reviews = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if limit.is_some_and(|max| reviews.len() >= max) {
            break;
        }
        let line = line.map_err(|error| (index + 1, error))?;
        let review = line.trim_end();
        if review.is_empty() {
            continue;
        }
        reviews.push(review.to_string());
    }
    Ok(reviews)
}
