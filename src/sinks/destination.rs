//! Byte destinations for formatted lines

use crate::core::{Result, SlogError};
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Where a [`WriterSink`](super::WriterSink) sends its lines.
///
/// `write_line` takes `&self`: a destination decides for itself what
/// concurrent writers see, and the sink decorators add locking on top.
pub trait Destination: Send + Sync {
    /// Write one complete line, newline included, in a single call.
    fn write_line(&self, line: &[u8]) -> io::Result<()>;
    fn flush(&self) -> io::Result<()>;
    fn name(&self) -> &str;

    fn is_terminal(&self) -> bool {
        false
    }
}

/// Standard output or standard error of the process. Never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramOutput {
    Stdout,
    Stderr,
}

impl Destination for ProgramOutput {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        match self {
            ProgramOutput::Stdout => io::stdout().lock().write_all(line),
            ProgramOutput::Stderr => io::stderr().lock().write_all(line),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            ProgramOutput::Stdout => io::stdout().flush(),
            ProgramOutput::Stderr => io::stderr().flush(),
        }
    }

    fn name(&self) -> &str {
        match self {
            ProgramOutput::Stdout => "stdout",
            ProgramOutput::Stderr => "stderr",
        }
    }

    fn is_terminal(&self) -> bool {
        match self {
            ProgramOutput::Stdout => io::stdout().is_terminal(),
            ProgramOutput::Stderr => io::stderr().is_terminal(),
        }
    }
}

/// A file opened in append mode, closed when dropped.
#[derive(Debug)]
pub struct FileDestination {
    path: PathBuf,
    file: File,
}

impl FileDestination {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SlogError::file_sink(path.display().to_string(), e))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Destination for FileDestination {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (&self.file).write_all(line)
    }

    fn flush(&self) -> io::Result<()> {
        (&self.file).flush()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileDestination {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
