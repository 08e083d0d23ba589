use std::io;
use thiserror::Error;

/// A transcript line that is not valid JSON. The line is skipped.
#[derive(Debug, Error)]
#[error("Error parsing line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    pub source: serde_json::Error,
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Error reading: {0}")]
    Read(#[source] io::Error),
    #[error("Error writing output: {0}")]
    Write(#[source] io::Error),
}

impl StreamError {
    /// True when the reader of our output went away (`cclean file | head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, StreamError::Write(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}
