//! Read-only snapshot types returned to presentation layers.
//!
//! A snapshot is the engine's whole contract toward renderers: it carries every
//! face, edge, and vertex with its derived metrics, but no live references and
//! no timestamps, so two snapshots taken without an intervening update compare
//! equal. Field names serialize in `camelCase` to match renderer expectations
//! (`faceAId`, `breathRatio`, `isLeveragePoint`, ...).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{
    BreathSeverity, BreathTendency, CoherenceStatus, Direction, EdgeStatus, Element,
    FlowDirection, HealthStatus, IntegrityStatus, ShadowSeverity, VortexDirection, VortexStatus,
};
use crate::ids::FaceId;

/// Complete engine state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub global_coherence: f64,
    pub coherence_status: CoherenceStatus,
    pub faces: Vec<FaceSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub vertices: Vec<VertexSnapshot>,
    pub breath: BreathSummary,
    pub shadow: ShadowSummary,
    pub statistics: Statistics,
}

impl EngineSnapshot {
    #[must_use]
    pub fn face(&self, id: FaceId) -> Option<&FaceSnapshot> {
        self.faces.iter().find(|face| face.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&EdgeSnapshot> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    #[must_use]
    pub fn vertex(&self, id: &str) -> Option<&VertexSnapshot> {
        self.vertices.iter().find(|vertex| vertex.id == id)
    }

    /// Look up a KPI across all faces.
    #[must_use]
    pub fn kpi(&self, id: &str) -> Option<&KpiSnapshot> {
        self.faces
            .iter()
            .flat_map(|face| face.kpis.iter())
            .find(|kpi| kpi.id == id)
    }
}

/// A single KPI with its normalized score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub id: String,
    pub name: Option<String>,
    pub face_id: FaceId,
    pub value: f64,
    pub target_min: f64,
    pub target_ideal: f64,
    pub direction: Direction,
    pub normalized_score: f64,
}

/// One organizational function.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaceSnapshot {
    pub id: FaceId,
    pub name: String,
    pub energy: f64,
    pub health_status: HealthStatus,
    /// True when the face owns no KPIs (its energy is then 0).
    pub is_empty: bool,
    /// Lowest-scoring owned KPI.
    pub critical_kpi: Option<String>,
    pub kpis: Vec<KpiSnapshot>,
}

/// Relationship between two faces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSnapshot {
    pub id: String,
    pub face_a_id: FaceId,
    pub face_b_id: FaceId,
    pub element: Element,
    pub breath_ratio: f64,
    pub flow_direction: FlowDirection,
    /// Element-weighted pull across the edge, in `[0, 1]`.
    pub tension: f64,
    pub status: EdgeStatus,
}

/// Convergence point of three faces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VertexSnapshot {
    pub id: String,
    pub face_ids: [FaceId; 3],
    pub vortex_direction: VortexDirection,
    pub coherence: f64,
    pub is_leverage_point: bool,
    /// Upward (positive) or downward (negative) spiral, in `[-1, 1]`.
    pub momentum: f64,
    /// Mean energy damped by the weakest face: `avg * sqrt(min / avg)`.
    pub vortex_energy: f64,
    pub status: VortexStatus,
}

/// One opposite-face axis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisSnapshot {
    pub name: String,
    pub reception_face: FaceId,
    pub projection_face: FaceId,
    pub reception_energy: f64,
    pub projection_energy: f64,
    pub ratio: f64,
    pub tendency: BreathTendency,
    pub severity: BreathSeverity,
    pub tension: f64,
}

/// Breath analysis across the six axes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreathSummary {
    pub breath_health: f64,
    pub balanced_axes: usize,
    pub over_exhaling: usize,
    pub over_inhaling: usize,
    pub critical_axes: usize,
    pub dominant_tendency: BreathTendency,
    pub axes: Vec<AxisSnapshot>,
}

/// A strong face casting a shadow on a weak one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShadowPatternSnapshot {
    pub name: String,
    pub severity: ShadowSeverity,
    pub penalty: f64,
    /// Strong faces the penalty is charged to.
    pub affected_faces: Vec<FaceId>,
    /// Weak faces that make the pattern visible.
    pub shadow_faces: Vec<FaceId>,
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacePenalty {
    pub face_id: FaceId,
    pub penalty: f64,
}

/// Shadow patterns detected across the faces, and the integrity left over.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSummary {
    pub patterns: Vec<ShadowPatternSnapshot>,
    /// Summed per-face penalty, capped at 0.9, for faces with any penalty.
    pub penalties: Vec<FacePenalty>,
    pub integrity_score: f64,
    pub integrity_status: IntegrityStatus,
}

/// Summary counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_kpis: usize,
    pub healthy_faces: usize,
    pub empty_faces: usize,
    pub leverage_points: usize,
    pub balanced_axes: usize,
}

/// What a single KPI update changed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub kpi_id: String,
    pub face_id: FaceId,
    pub previous_value: f64,
    pub value: f64,
    pub previous_score: f64,
    pub normalized_score: f64,
    pub touched_edges: Vec<String>,
    pub touched_vertices: Vec<String>,
    pub previous_coherence: f64,
    pub global_coherence: f64,
}

/// The single highest-leverage KPI improvement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub kpi_id: String,
    pub kpi_name: Option<String>,
    pub face_id: FaceId,
    pub current_value: f64,
    pub current_score: f64,
    /// Value at which the KPI reaches a full score.
    pub target_value: f64,
    pub projected_coherence: f64,
    pub expected_gain: f64,
}
