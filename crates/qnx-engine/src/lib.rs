//! # qnx-engine
//!
//! Dodecahedral coherence scoring for Quannex.
//!
//! KPIs are normalized to `[0, 1]` and grouped onto 12 faces; each face's
//! energy feeds its 5 edges (breath ratio, flow direction) and 5 vertices
//! (harmonic coherence, leverage points). A weighted mean of face energy and
//! vertex coherence gives the global score. Snapshots also report shadow
//! patterns, where one strong face hides a weak one.
//!
//! ```no_run
//! use qnx_engine::{CoherenceEngine, demo::demo_loader};
//!
//! # async fn run() -> Result<(), qnx_engine::EngineError> {
//! let engine = CoherenceEngine::default();
//! engine.initialize(&demo_loader()).await?;
//! engine.update_kpi("fin-runway", 12.0)?;
//! println!("{:.3}", engine.global_coherence());
//! # Ok(())
//! # }
//! ```

pub mod axis;
pub mod demo;
pub mod edge;
pub mod engine;
pub mod error;
pub mod face;
pub mod ingest;
pub mod kpi;
pub mod loader;
pub mod model;
pub mod shadow;
pub mod topology;
pub mod vertex;

pub use engine::CoherenceEngine;
pub use error::{EngineError, InitializationError};
pub use ingest::LoadReport;
pub use loader::{DataLoader, JsonDirLoader, LoaderError, StaticLoader};
pub use model::ScoringPolicy;
pub use topology::{DODECAHEDRON, builtin_topology_rows};
