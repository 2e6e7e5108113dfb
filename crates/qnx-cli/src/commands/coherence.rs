use qnx_core::enums::{BreathTendency, CoherenceStatus, IntegrityStatus};
use qnx_core::snapshot::{EngineSnapshot, Statistics};
use qnx_engine::CoherenceEngine;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoherenceSummary {
    global_coherence: f64,
    coherence_status: CoherenceStatus,
    breath_health: f64,
    dominant_tendency: BreathTendency,
    integrity_score: f64,
    integrity_status: IntegrityStatus,
    shadow_patterns: usize,
    #[serde(flatten)]
    statistics: Statistics,
}

impl From<&EngineSnapshot> for CoherenceSummary {
    fn from(snapshot: &EngineSnapshot) -> Self {
        Self {
            global_coherence: snapshot.global_coherence,
            coherence_status: snapshot.coherence_status,
            breath_health: snapshot.breath.breath_health,
            dominant_tendency: snapshot.breath.dominant_tendency,
            integrity_score: snapshot.shadow.integrity_score,
            integrity_status: snapshot.shadow.integrity_status,
            shadow_patterns: snapshot.shadow.patterns.len(),
            statistics: snapshot.statistics,
        }
    }
}

/// Handle `qnx coherence`.
pub fn handle(engine: &CoherenceEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = engine.state()?;
    output(&CoherenceSummary::from(&snapshot), flags.format)
}
