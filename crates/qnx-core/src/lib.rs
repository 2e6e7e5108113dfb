//! # qnx-core
//!
//! Core types shared across all Quannex crates.
//!
//! This crate provides the foundational vocabulary of the coherence engine:
//! - Enums for KPI direction, health bands, edge elements, flow and vortex directions
//! - The [`FaceId`](ids::FaceId) identifier for the 12 dodecahedron faces
//! - Loader row types handed to the engine by data-loading collaborators
//! - Read-only snapshot types returned to presentation layers
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod ids;
pub mod rows;
pub mod snapshot;
