//! Loader row types.
//!
//! Data-loading collaborators hand the engine loosely-typed rows: a mapping
//! from column name to cell text. The engine owns interpretation (column
//! aliases, numeric parsing, enum matching) so that a malformed row can be
//! skipped with a diagnostic instead of failing the whole load.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Logical KPI columns and the aliases accepted for each.
pub mod kpi_columns {
    pub const ID: &[&str] = &["id", "kpiId", "KPI_ID"];
    pub const NAME: &[&str] = &["name", "kpiName", "KPI_Name"];
    pub const FACE_ID: &[&str] = &["faceId", "face_id", "Face_ID"];
    pub const VALUE: &[&str] = &["value", "Value"];
    pub const TARGET_MIN: &[&str] = &["targetMin", "target_min", "Target_Min"];
    pub const TARGET_IDEAL: &[&str] = &["targetIdeal", "target_ideal", "Target_Ideal"];
    pub const DIRECTION: &[&str] = &["direction", "Direction"];
}

/// Logical edge columns and their aliases.
pub mod edge_columns {
    pub const ID: &[&str] = &["edgeId", "id", "Edge_ID"];
    pub const FACE_A: &[&str] = &["faceAId", "faceA", "Face_A_ID"];
    pub const FACE_B: &[&str] = &["faceBId", "faceB", "Face_B_ID"];
    pub const ELEMENT: &[&str] = &["element", "Element"];
}

/// Logical vertex columns and their aliases.
pub mod vertex_columns {
    pub const ID: &[&str] = &["vertexId", "id", "Vertex_ID"];
    pub const FACE_1: &[&str] = &["faceId1", "face1", "Face_1_ID"];
    pub const FACE_2: &[&str] = &["faceId2", "face2", "Face_2_ID"];
    pub const FACE_3: &[&str] = &["faceId3", "face3", "Face_3_ID"];
    pub const VORTEX_DIRECTION: &[&str] = &["vortexDirection", "vortex_direction", "Vortex"];
}

/// One loosely-typed row: column name → cell text.
///
/// Deserializes from a JSON object whose values may be strings, numbers, or
/// booleans; `null` cells are dropped so they read as missing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, handy for in-memory loaders and tests.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(column.into(), value.to_string());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// First non-blank cell among `aliases`, trimmed.
    #[must_use]
    pub fn get(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for RawRow {
    fn from(cells: BTreeMap<String, Value>) -> Self {
        Self(
            cells
                .into_iter()
                .filter_map(|(column, value)| {
                    let text = match value {
                        Value::Null => return None,
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    Some((column, text))
                })
                .collect(),
        )
    }
}

/// Topology rows: 30 edges and 20 vertices for a well-formed dodecahedron.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopologyRows {
    #[serde(default)]
    pub edges: Vec<RawRow>,
    #[serde(default)]
    pub vertices: Vec<RawRow>,
}
