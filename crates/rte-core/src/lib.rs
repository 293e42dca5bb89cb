//! `rte-core` — foundational types for the response-time estimator.
//!
//! This crate is a dependency of every other `rte-*` crate.  It has no
//! `rte-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`, `ArcId`                              |
//! | [`geo`]      | `GeoPoint`, haversine distance, segment projection       |
//! | [`units`]    | `DistanceUnit`, `TimeUnit`, speed/time conversions       |
//! | [`model`]    | `Point`, `RoadSegment`                                   |
//! | [`config`]   | `EstimatorConfig`, `TieInConfig`, `TieInMode`            |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod model;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EstimatorConfig, TieInConfig, TieInMode};
pub use error::{CoreError, CoreResult};
pub use geo::{polyline_length_m, GeoPoint};
pub use ids::{ArcId, EdgeId, NodeId};
pub use model::{Point, RoadSegment};
pub use units::{DistanceUnit, TimeUnit};
