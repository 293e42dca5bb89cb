//! `rte-estimate` — response-time estimation over a road graph.
//!
//! # Per-pair evaluation
//!
//! ```text
//! for origin in origins:                       (input order)
//!   for destination in destinations:           (input order)
//!     ① Tie-in    — both points resolved onto the graph (once per point
//!                   per batch); failure → RouteFailure::*TieIn
//!     ② Overlay   — QueryGraph with virtual vertices for edge ties
//!     ③ Distance  — Dijkstra minimising metres
//!     ④ Time      — independent Dijkstra minimising seconds
//!     ⑤ Report    — RouteResult in the configured display units
//! ```
//!
//! Failures are local to a pair.  Every input pair produces exactly one
//! [`RouteResult`]; only graph construction can fail a whole batch.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Adds `Estimator::run_batch_parallel` (Rayon).          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rte_core::EstimatorConfig;
//! use rte_estimate::Estimator;
//!
//! let estimator = Estimator::new(&segments, EstimatorConfig::default())?;
//! for result in estimator.run_batch(&stations, &incidents) {
//!     println!("{} → {}: {:?}", result.origin, result.destination, result.fastest_time());
//! }
//! ```

pub mod error;
pub mod estimator;
pub mod result;
pub mod sink;


pub use error::{EstimateError, EstimateResult};
pub use estimator::Estimator;
pub use result::{RouteCosts, RouteFailure, RouteResult};
pub use sink::{BatchSummary, NoopSink, ResultSink};
