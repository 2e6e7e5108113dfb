use qnx_core::enums::{Direction, HealthStatus};
use qnx_core::ids::FaceId;
use qnx_core::snapshot::{EngineSnapshot, FaceSnapshot};
use qnx_engine::CoherenceEngine;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ListArgs, ListTarget};
use crate::output::output;

/// Face row without the nested KPI list, so tables stay one line per face.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FaceRow<'a> {
    id: FaceId,
    name: &'a str,
    energy: f64,
    health_status: HealthStatus,
    kpis: usize,
    critical_kpi: Option<&'a str>,
}

impl<'a> From<&'a FaceSnapshot> for FaceRow<'a> {
    fn from(face: &'a FaceSnapshot) -> Self {
        Self {
            id: face.id,
            name: &face.name,
            energy: face.energy,
            health_status: face.health_status,
            kpis: face.kpis.len(),
            critical_kpi: face.critical_kpi.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KpiRow<'a> {
    id: &'a str,
    face_id: FaceId,
    value: f64,
    target_min: f64,
    target_ideal: f64,
    direction: Direction,
    normalized_score: f64,
}

fn kpi_rows(snapshot: &EngineSnapshot) -> Vec<KpiRow<'_>> {
    snapshot
        .faces
        .iter()
        .flat_map(|face| &face.kpis)
        .map(|kpi| KpiRow {
            id: &kpi.id,
            face_id: kpi.face_id,
            value: kpi.value,
            target_min: kpi.target_min,
            target_ideal: kpi.target_ideal,
            direction: kpi.direction,
            normalized_score: kpi.normalized_score,
        })
        .collect()
}

/// Handle `qnx list <target>`.
pub fn handle(args: &ListArgs, engine: &CoherenceEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = engine.state()?;
    match args.target {
        ListTarget::Faces => {
            let rows: Vec<FaceRow<'_>> = snapshot.faces.iter().map(FaceRow::from).collect();
            output(&rows, flags.format)
        }
        ListTarget::Kpis => output(&kpi_rows(&snapshot), flags.format),
        ListTarget::Edges => output(&snapshot.edges, flags.format),
        ListTarget::Vertices => output(&snapshot.vertices, flags.format),
        ListTarget::Axes => output(&snapshot.breath.axes, flags.format),
        ListTarget::Shadows => output(&snapshot.shadow.patterns, flags.format),
    }
}
