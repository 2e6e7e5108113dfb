//! Data-loading collaborators.
//!
//! The engine never reads files itself: it asks a [`DataLoader`] for KPI rows
//! and topology rows and interprets them. Two loaders ship with the crate:
//! [`StaticLoader`] for in-memory data and [`JsonDirLoader`] for a directory
//! holding `kpis.json` and (optionally) `topology.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use qnx_core::rows::{RawRow, TopologyRows};
use thiserror::Error;

use crate::topology::builtin_topology_rows;

pub const KPI_FILE: &str = "kpis.json";
pub const TOPOLOGY_FILE: &str = "topology.json";

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Source of raw rows for [`CoherenceEngine::initialize`](crate::CoherenceEngine::initialize).
///
/// The two fetches are independent and are awaited concurrently.
#[async_trait]
pub trait DataLoader: Send + Sync {
    async fn load_kpi_rows(&self) -> Result<Vec<RawRow>, LoaderError>;

    async fn load_topology(&self) -> Result<TopologyRows, LoaderError>;
}

/// In-memory rows. Defaults to the built-in topology when none is given.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    kpi_rows: Vec<RawRow>,
    topology: Option<TopologyRows>,
}

impl StaticLoader {
    #[must_use]
    pub fn new(kpi_rows: Vec<RawRow>) -> Self {
        Self {
            kpi_rows,
            topology: None,
        }
    }

    #[must_use]
    pub fn with_topology(mut self, topology: TopologyRows) -> Self {
        self.topology = Some(topology);
        self
    }
}

#[async_trait]
impl DataLoader for StaticLoader {
    async fn load_kpi_rows(&self) -> Result<Vec<RawRow>, LoaderError> {
        Ok(self.kpi_rows.clone())
    }

    async fn load_topology(&self) -> Result<TopologyRows, LoaderError> {
        Ok(self.topology.clone().unwrap_or_else(builtin_topology_rows))
    }
}

/// Reads a dataset directory with `tokio::fs`.
///
/// `kpis.json` holds an array of row objects. `topology.json` holds
/// `{"edges": [...], "vertices": [...]}`; when absent the built-in
/// dodecahedron is used.
#[derive(Debug, Clone)]
pub struct JsonDirLoader {
    dir: PathBuf,
}

impl JsonDirLoader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DataLoader for JsonDirLoader {
    async fn load_kpi_rows(&self) -> Result<Vec<RawRow>, LoaderError> {
        let path = self.dir.join(KPI_FILE);
        let bytes = read(&path).await?;
        parse(&path, &bytes)
    }

    async fn load_topology(&self) -> Result<TopologyRows, LoaderError> {
        let path = self.dir.join(TOPOLOGY_FILE);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "no topology file; using built-in dodecahedron");
            return Ok(builtin_topology_rows());
        }
        let bytes = read(&path).await?;
        parse(&path, &bytes)
    }
}

async fn read(path: &Path) -> Result<Vec<u8>, LoaderError> {
    tokio::fs::read(path).await.map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, LoaderError> {
    serde_json::from_slice(bytes).map_err(|source| LoaderError::Json {
        path: path.to_path_buf(),
        source,
    })
}
