//! Network-subsystem error type.

use thiserror::Error;

use rte_core::{CoreError, GeoPoint, NodeId};

/// Errors produced by `rte-network`.
///
/// The first five variants describe unusable graph input and abort
/// construction; `NoRoute` and `NodeNotFound` come from individual queries.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no road segments supplied; a road graph needs at least one")]
    EmptyNetwork,

    #[error("segment {index} has invalid length {length_m} m")]
    InvalidLength { index: usize, length_m: f64 },

    #[error("segment {index} has non-finite travel time at the default speed")]
    InvalidTravelTime { index: usize },

    #[error("segment {index} has invalid coordinate {pos}")]
    InvalidCoordinate { index: usize, pos: GeoPoint },

    #[error("road graph exceeds 32-bit id capacity")]
    CapacityExceeded,

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Config(#[from] CoreError),
}

impl NetworkError {
    /// `true` for errors that make the whole graph unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            NetworkError::EmptyNetwork
                | NetworkError::InvalidLength { .. }
                | NetworkError::InvalidTravelTime { .. }
                | NetworkError::InvalidCoordinate { .. }
                | NetworkError::CapacityExceeded
                | NetworkError::Config(_)
        )
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
