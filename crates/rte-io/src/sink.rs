//! `WriterSink<W>` — bridges `ResultSink` to a `ResultWriter`.

use rte_estimate::{BatchSummary, ResultSink, RouteResult};
use tracing::debug;

use crate::writer::ResultWriter;
use crate::{IoError, IoResult, ResultRow};

/// Rows are buffered and written in chunks of this many.
const CHUNK: usize = 1024;

/// A [`ResultSink`] that writes every result to any [`ResultWriter`]
/// backend.
///
/// Write errors are stored internally because `ResultSink` methods have no
/// return value.  After the batch returns, check with
/// [`take_error`][Self::take_error].
pub struct WriterSink<W: ResultWriter> {
    writer:     W,
    pending:    Vec<ResultRow>,
    written:    usize,
    last_error: Option<IoError>,
}

impl<W: ResultWriter> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::with_capacity(CHUNK), written: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<IoError> {
        self.last_error.take()
    }

    /// Rows the writer has accepted so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_rows(&self.pending);
        if result.is_ok() {
            self.written += self.pending.len();
        }
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: IoResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ResultWriter> ResultSink for WriterSink<W> {
    fn on_result(&mut self, result: RouteResult) {
        self.pending.push(ResultRow::from(&result));
        if self.pending.len() >= CHUNK {
            self.flush_pending();
        }
    }

    fn on_batch_end(&mut self, summary: &BatchSummary) {
        self.flush_pending();
        let result = self.writer.finish();
        self.store_err(result);
        debug!(rows = self.written, pairs = summary.pairs, "results written");
    }
}
