//! Implementation of different callback functions.
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Trait for implementing callbacks that are informed about finished runs
pub trait Callback<R> {
    /// This method is called after each successfully finished run and may print information
    /// about it.
    fn print(&self, report: &R);
}

/// A callback function that does nothing
pub struct SinkCallback {}

impl<R> Callback<R> for SinkCallback {
    fn print(&self, _: &R) {}
}

/// A callback function that prints every report to the standard output
pub struct SimpleCallback {}

impl<R: Display> Callback<R> for SimpleCallback {
    fn print(&self, report: &R) {
        println!("{}", report);
    }
}

/// A callback that writes the most recent report as JSON into a file.
///
/// The file is overwritten each time a report arrives. Failing to write the file does not abort
/// the computation; the error is printed to the standard error instead.
pub struct FileWriterCallback {
    path: PathBuf,
}

impl FileWriterCallback {
    /// Create a callback writing to `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn write<R: Serialize>(&self, report: &R) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()
    }
}

impl<R: Serialize> Callback<R> for FileWriterCallback {
    fn print(&self, report: &R) {
        if let Err(err) = self.write(report) {
            eprintln!(
                "unable to write report to '{}': {}",
                self.path.display(),
                err
            );
        }
    }
}
