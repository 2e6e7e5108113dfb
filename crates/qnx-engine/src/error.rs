//! Engine error types.

use std::time::Duration;

use qnx_core::ids::FaceId;
use thiserror::Error;

use crate::loader::LoaderError;

/// Errors surfaced by [`CoherenceEngine`](crate::CoherenceEngine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// KPI bounds are degenerate (`targetMin == targetIdeal`) or non-finite.
    #[error(
        "Invalid target range for KPI '{kpi_id}': targetMin={target_min}, targetIdeal={target_ideal}"
    )]
    InvalidRange {
        kpi_id: String,
        target_min: f64,
        target_ideal: f64,
    },

    /// A KPI value is NaN or infinite.
    #[error("Invalid value for KPI '{kpi_id}': {value}")]
    InvalidValue { kpi_id: String, value: f64 },

    /// The engine could not be populated and remains uninitialized.
    #[error("Initialization failed: {0}")]
    Initialization(#[from] InitializationError),

    /// The requested entity does not exist. No state was mutated.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("Initialization is already in progress")]
    AlreadyInitializing,

    #[error("Engine is already initialized")]
    AlreadyInitialized,

    #[error("Engine is not initialized")]
    NotInitialized,
}

impl EngineError {
    pub(crate) fn kpi_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "kpi",
            id: id.to_string(),
        }
    }
}

/// Why a load could not produce a well-formed dodecahedron.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Expected {expected} {entity_type}s, got {actual}")]
    TopologyCount {
        entity_type: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{entity_type} '{id}' references unknown face '{face}'")]
    UnknownFace {
        entity_type: &'static str,
        id: String,
        face: String,
    },

    #[error("{entity_type} '{id}' repeats face {face}")]
    RepeatedFace {
        entity_type: &'static str,
        id: String,
        face: FaceId,
    },

    #[error("Duplicate {entity_type} id '{id}'")]
    DuplicateId { entity_type: &'static str, id: String },

    #[error("Face {face} touches {actual} {entity_type}s, expected {expected}")]
    FaceDegree {
        face: FaceId,
        entity_type: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Edges '{id}' and '{other}' join the same faces")]
    ParallelEdge { id: String, other: String },

    #[error("Vertex '{vertex}' meets faces {face_a} and {face_b}, which share no edge")]
    UnjoinedFaces {
        vertex: String,
        face_a: FaceId,
        face_b: FaceId,
    },

    #[error("Edge '{id}' ends at {actual} vertices, expected 2")]
    EdgeEnds { id: String, actual: usize },

    #[error("Data loader failed: {0}")]
    Loader(#[from] LoaderError),

    #[error("Data load timed out after {0:?}")]
    Timeout(Duration),
}
