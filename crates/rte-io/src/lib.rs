//! `rte-io` — file formats for the response-time estimator.
//!
//! # Inputs
//!
//! | Format  | Roads                          | Points                       |
//! |---------|--------------------------------|------------------------------|
//! | CSV     | [`load_segments_csv`]          | [`load_points_csv`]          |
//! | GeoJSON | [`load_roads_geojson`]         | [`load_points_geojson`]      |
//!
//! Every loader has a `*_reader` twin that accepts any `Read` source.
//!
//! # Outputs
//!
//! | Feature  | Backend | Writer                  |
//! |----------|---------|-------------------------|
//! | *(none)* | CSV     | [`CsvResultWriter`]     |
//! | `sqlite` | SQLite  | `SqliteResultWriter`    |
//!
//! Both implement [`ResultWriter`] and are driven by [`WriterSink`], which
//! implements `rte_estimate::ResultSink`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rte_io::{CsvResultWriter, WriterSink};
//!
//! let writer = CsvResultWriter::new(Path::new("results.csv"), units)?;
//! let mut sink = WriterSink::new(writer);
//! estimator.run_batch_into(&stations, &incidents, &mut sink);
//! if let Some(e) = sink.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod loader;
pub mod row;
pub mod sink;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvResultWriter;
pub use crate::geojson::{
    load_points_geojson, load_points_geojson_reader, load_roads_geojson, load_roads_geojson_reader,
};
pub use error::{IoError, IoResult};
pub use loader::{load_points_csv, load_points_reader, load_segments_csv, load_segments_reader};
pub use row::{ResultRow, Units};
pub use sink::WriterSink;
pub use writer::ResultWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteResultWriter;
