//! `rte-network` — road graph, point tie-in, and routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`network`]    | `RoadGraph` (CSR + R-trees), `RoadGraphBuilder`, `Components` |
//! | [`tie_in`]     | `tie_in`, `TiedPoint`, `Anchor`, `TieInFailure`            |
//! | [`query`]      | `QueryGraph` overlay with virtual vertices for edge ties   |
//! | [`router`]     | `Router` trait, `Route`, `Weight`, `DijkstraRouter`        |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `rte-core` types.       |

pub mod error;
pub mod network;
pub mod query;
pub mod router;
pub mod tie_in;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{Components, RoadGraph, RoadGraphBuilder};
pub use query::{ArcView, QueryGraph};
pub use router::{DijkstraRouter, Route, Router, Weight};
pub use tie_in::{tie_in, Anchor, TieInFailure, TiedPoint};
