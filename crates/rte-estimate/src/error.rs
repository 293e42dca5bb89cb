use rte_core::CoreError;
use rte_network::NetworkError;
use thiserror::Error;

/// Errors that abort a whole batch.  Per-pair problems are reported in
/// [`RouteResult`](crate::RouteResult) instead.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("cannot build road graph: {0}")]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type EstimateResult<T> = Result<T, EstimateError>;
