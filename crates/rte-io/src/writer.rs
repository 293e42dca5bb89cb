//! The `ResultWriter` trait implemented by all backend writers.

use crate::{IoResult, ResultRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`WriterSink`](crate::WriterSink)
/// stores them because sink callbacks have no return value.
pub trait ResultWriter {
    /// Append a batch of rows.
    fn write_rows(&mut self, rows: &[ResultRow]) -> IoResult<()>;

    /// Flush and close the underlying storage.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> IoResult<()>;
}
