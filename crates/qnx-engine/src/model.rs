//! The populated dodecahedron: records, faces, edges, vertices, and the
//! face adjacency index used for incremental recompute.

use std::collections::BTreeMap;

use qnx_config::ScoringConfig;
use qnx_core::enums::{BreathTendency, CoherenceStatus};
use qnx_core::ids::{FACE_COUNT, FaceId};
use qnx_core::snapshot::{ActionPlan, EngineSnapshot, Statistics, UpdateOutcome};

use crate::axis::{self, BreathBand};
use crate::edge::Edge;
use crate::error::EngineError;
use crate::face::{Face, HealthBands};
use crate::kpi::KpiRecord;
use crate::shadow;
use crate::vertex::{LeverageThresholds, Vertex};

/// Scoring parameters resolved from [`ScoringConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub bands: HealthBands,
    pub flow_epsilon: f64,
    pub leverage: LeverageThresholds,
    pub face_weight: f64,
    pub vertex_weight: f64,
    pub breath: BreathBand,
}

impl From<&ScoringConfig> for ScoringPolicy {
    fn from(config: &ScoringConfig) -> Self {
        let (face_weight, vertex_weight) = config.normalized_weights();
        Self {
            bands: HealthBands::new(config.health_cut_points),
            flow_epsilon: config.flow_epsilon,
            leverage: LeverageThresholds {
                coherence_min: config.leverage_coherence_min,
                variance_max: config.leverage_variance_max,
            },
            face_weight,
            vertex_weight,
            breath: BreathBand {
                balanced_min: config.breath_balanced_min,
                balanced_max: config.breath_balanced_max,
            },
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

/// Indices of the edges and vertices touching one face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Incidence {
    edges: Vec<usize>,
    vertices: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Model {
    policy: ScoringPolicy,
    kpis: BTreeMap<String, KpiRecord>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
    incidence: Vec<Incidence>,
    global_coherence: f64,
}

impl Model {
    /// Assemble a model from validated parts and compute every metric once.
    ///
    /// Edges and vertices are expected in id order with a valid topology.
    pub(crate) fn build(
        policy: ScoringPolicy,
        records: Vec<KpiRecord>,
        edges: Vec<Edge>,
        vertices: Vec<Vertex>,
    ) -> Self {
        let mut faces: Vec<Face> = FaceId::all().map(Face::new).collect();
        let mut kpis = BTreeMap::new();
        for record in records {
            faces[record.face_id().index()].push_kpi(record.id());
            kpis.insert(record.id().to_string(), record);
        }

        let mut incidence = vec![Incidence::default(); FACE_COUNT];
        for (index, edge) in edges.iter().enumerate() {
            let (a, b) = edge.faces();
            incidence[a.index()].edges.push(index);
            incidence[b.index()].edges.push(index);
        }
        for (index, vertex) in vertices.iter().enumerate() {
            for face in vertex.faces() {
                incidence[face.index()].vertices.push(index);
            }
        }

        let mut model = Self {
            policy,
            kpis,
            faces,
            edges,
            vertices,
            incidence,
            global_coherence: 0.0,
        };
        model.recompute_all();
        model
    }

    fn recompute_all(&mut self) {
        for face in &mut self.faces {
            face.recompute(&self.kpis, &self.policy.bands);
        }
        for index in 0..self.edges.len() {
            self.recompute_edge(index);
        }
        for index in 0..self.vertices.len() {
            self.recompute_vertex(index);
        }
        self.recompute_global();
    }

    fn energy(&self, face: FaceId) -> f64 {
        self.faces[face.index()].energy()
    }

    fn recompute_edge(&mut self, index: usize) {
        let (a, b) = self.edges[index].faces();
        let (energy_a, energy_b) = (self.energy(a), self.energy(b));
        self.edges[index].recompute(energy_a, energy_b, self.policy.flow_epsilon);
    }

    fn recompute_vertex(&mut self, index: usize) {
        let energies = self.vertices[index].faces().map(|face| self.energy(face));
        self.vertices[index].recompute(energies, &self.policy.leverage);
    }

    /// Weighted mean of face energy and vertex coherence, summed in id order.
    fn recompute_global(&mut self) {
        let face_mean = mean(self.faces.iter().map(Face::energy));
        let vertex_mean = mean(self.vertices.iter().map(Vertex::coherence));
        let score = self.policy.face_weight * face_mean + self.policy.vertex_weight * vertex_mean;
        self.global_coherence = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Set one KPI and recompute only its face, that face's incident edges
    /// and vertices, and the global score.
    pub fn update_kpi(&mut self, kpi_id: &str, value: f64) -> Result<UpdateOutcome, EngineError> {
        let record = self
            .kpis
            .get_mut(kpi_id)
            .ok_or_else(|| EngineError::kpi_not_found(kpi_id))?;
        let previous_value = record.value();
        let previous_score = record.normalized_score();
        record.set_value(value)?;
        let normalized_score = record.normalized_score();
        let face_id = record.face_id();

        let previous_coherence = self.global_coherence;
        self.faces[face_id.index()].recompute(&self.kpis, &self.policy.bands);

        let Incidence { edges, vertices } = self.incidence[face_id.index()].clone();
        for &index in &edges {
            self.recompute_edge(index);
        }
        for &index in &vertices {
            self.recompute_vertex(index);
        }
        self.recompute_global();

        Ok(UpdateOutcome {
            kpi_id: kpi_id.to_string(),
            face_id,
            previous_value,
            value,
            previous_score,
            normalized_score,
            touched_edges: edges.iter().map(|&i| self.edges[i].id().to_string()).collect(),
            touched_vertices: vertices
                .iter()
                .map(|&i| self.vertices[i].id().to_string())
                .collect(),
            previous_coherence,
            global_coherence: self.global_coherence,
        })
    }

    #[must_use]
    pub const fn global_coherence(&self) -> f64 {
        self.global_coherence
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter()
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let mut energies = [0.0; FACE_COUNT];
        for face in &self.faces {
            energies[face.id().index()] = face.energy();
        }
        let breath = axis::analyze(&energies, &self.policy.breath);
        let shadow = shadow::analyze(&energies);

        let statistics = Statistics {
            total_kpis: self.kpis.len(),
            healthy_faces: self
                .faces
                .iter()
                .filter(|f| f.health_status().is_healthy())
                .count(),
            empty_faces: self.faces.iter().filter(|f| f.is_empty()).count(),
            leverage_points: self
                .vertices
                .iter()
                .filter(|v| v.is_leverage_point())
                .count(),
            balanced_axes: breath
                .axes
                .iter()
                .filter(|a| a.tendency == BreathTendency::Balanced)
                .count(),
        };

        EngineSnapshot {
            global_coherence: self.global_coherence,
            coherence_status: CoherenceStatus::from_score(self.global_coherence),
            faces: self
                .faces
                .iter()
                .map(|face| face.to_snapshot(&self.kpis))
                .collect(),
            edges: self.edges.iter().map(Edge::to_snapshot).collect(),
            vertices: self.vertices.iter().map(Vertex::to_snapshot).collect(),
            breath,
            shadow,
            statistics,
        }
    }

    /// The lowest-scoring KPI and the gain from bringing it to a full score,
    /// simulated on a copy.
    #[must_use]
    pub fn action_plan(&self) -> Option<ActionPlan> {
        let weakest = self
            .kpis
            .values()
            .filter(|kpi| kpi.normalized_score() < 1.0)
            .min_by(|a, b| {
                a.normalized_score()
                    .total_cmp(&b.normalized_score())
                    .then_with(|| a.id().cmp(b.id()))
            })?;

        let target_value = weakest.full_score_value();
        let mut scratch = self.clone();
        let outcome = scratch.update_kpi(weakest.id(), target_value).ok()?;

        Some(ActionPlan {
            kpi_id: weakest.id().to_string(),
            kpi_name: weakest.name().map(str::to_string),
            face_id: weakest.face_id(),
            current_value: weakest.value(),
            current_score: weakest.normalized_score(),
            target_value,
            projected_coherence: outcome.global_coherence,
            expected_gain: outcome.global_coherence - self.global_coherence,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}
