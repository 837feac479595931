//! Input data handling for cache simulation
//!
//! Trace files are CSV with a `timestamp,query_index,response_size` header.
//! Lines starting with `#` are ignored. Requests are streamed file by file,
//! so memory stays proportional to cache size rather than trace size.

use crate::models::Request;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Error types for trace parsing
#[derive(Debug)]
pub enum LogParseError {
    /// Listing or opening a trace failed
    Io(io::Error),
    /// A record could not be decoded
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    /// No trace files were found under the given inputs
    NoInput,
}

impl fmt::Display for LogParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogParseError::Io(err) => write!(f, "I/O error: {err}"),
            LogParseError::Csv { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            LogParseError::NoInput => f.write_str("no trace files found"),
        }
    }
}

impl std::error::Error for LogParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogParseError::Io(err) => Some(err),
            LogParseError::Csv { source, .. } => Some(source),
            LogParseError::NoInput => None,
        }
    }
}

impl From<io::Error> for LogParseError {
    fn from(err: io::Error) -> Self {
        LogParseError::Io(err)
    }
}

/// Reader for request traces
#[derive(Debug, Clone)]
pub struct LogReader {
    inputs: Vec<PathBuf>,
}

impl LogReader {
    /// Create a reader over trace files and/or directories of trace files
    pub fn new<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            inputs: inputs
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
        }
    }

    /// Resolve inputs to trace files. Directories expand to their `.csv`,
    /// `.log` and `.txt` files sorted by name; plain files are kept as given.
    pub fn get_log_files(&self) -> Result<Vec<PathBuf>, LogParseError> {
        let mut log_files = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                let mut found = Vec::new();
                for entry in fs::read_dir(input)? {
                    let path = entry?.path();
                    let is_trace = path.is_file()
                        && path
                            .extension()
                            .is_some_and(|ext| ext == "csv" || ext == "log" || ext == "txt");
                    if is_trace {
                        found.push(path);
                    }
                }
                found.sort();
                log_files.extend(found);
            } else {
                log_files.push(input.clone());
            }
        }

        if log_files.is_empty() {
            return Err(LogParseError::NoInput);
        }
        Ok(log_files)
    }

    /// Stream requests from every trace in order
    pub fn stream_requests(&self) -> Result<RequestIterator, LogParseError> {
        RequestIterator::new(self.get_log_files()?)
    }

    /// Read every request into memory (small traces and tests)
    pub fn read_all(&self) -> Result<Vec<Request>, LogParseError> {
        self.stream_requests()?.collect()
    }
}

/// Streams requests across trace files, opening the next file when the
/// current one is exhausted
pub struct RequestIterator {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, csv::DeserializeRecordsIntoIter<File, Request>)>,
}

impl fmt::Debug for RequestIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestIterator")
            .field("current", &self.current.as_ref().map(|(path, _)| path))
            .field("remaining_files", &self.files.len())
            .finish()
    }
}

impl RequestIterator {
    fn new(files: Vec<PathBuf>) -> Result<Self, LogParseError> {
        let mut iter = Self {
            files: files.into_iter(),
            current: None,
        };
        iter.open_next()?;
        Ok(iter)
    }

    fn open_next(&mut self) -> Result<bool, LogParseError> {
        let Some(path) = self.files.next() else {
            self.current = None;
            return Ok(false);
        };
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|source| LogParseError::Csv {
                path: path.clone(),
                source,
            })?;
        self.current = Some((path, reader.into_deserialize()));
        Ok(true)
    }
}

impl Iterator for RequestIterator {
    type Item = Result<Request, LogParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (path, records) = self.current.as_mut()?;
            match records.next() {
                Some(Ok(request)) => return Some(Ok(request)),
                Some(Err(source)) => {
                    return Some(Err(LogParseError::Csv {
                        path: path.clone(),
                        source,
                    }))
                }
                None => match self.open_next() {
                    Ok(true) => continue,
                    Ok(false) => return None,
                    Err(err) => return Some(Err(err)),
                },
            }
        }
    }
}
