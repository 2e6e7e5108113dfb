//! Breath analysis across the six opposite-face axes.
//!
//! Each axis pairs a reception face (inhale) with the opposite projection
//! face (exhale). A ratio near 1 means the organization takes in about as
//! much as it puts out along that polarity.

use qnx_core::enums::{BreathSeverity, BreathTendency};
use qnx_core::ids::{FACE_COUNT, FaceId};
use qnx_core::snapshot::{AxisSnapshot, BreathSummary};

/// Upper bound on a ratio whose projection side carries no energy.
pub const BREATH_RATIO_CAP: f64 = 10.0;

const CRITICAL_LOW: f64 = 0.5;
const CRITICAL_HIGH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSpec {
    pub name: &'static str,
    pub reception: u8,
    pub projection: u8,
}

pub const AXES: [AxisSpec; 6] = [
    AxisSpec {
        name: "Resource Flow",
        reception: 1,
        projection: 11,
    },
    AxisSpec {
        name: "Substance & Story",
        reception: 2,
        projection: 7,
    },
    AxisSpec {
        name: "Being & Doing",
        reception: 3,
        projection: 8,
    },
    AxisSpec {
        name: "Form & Integrity",
        reception: 9,
        projection: 4,
    },
    AxisSpec {
        name: "Perception & Truth",
        reception: 10,
        projection: 5,
    },
    AxisSpec {
        name: "Network & Fortress",
        reception: 12,
        projection: 6,
    },
];

/// Balanced band for the reception/projection ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathBand {
    pub balanced_min: f64,
    pub balanced_max: f64,
}

impl Default for BreathBand {
    fn default() -> Self {
        Self {
            balanced_min: qnx_config::DEFAULT_BREATH_BALANCED_MIN,
            balanced_max: qnx_config::DEFAULT_BREATH_BALANCED_MAX,
        }
    }
}

/// The face across the dodecahedron from `face`.
#[must_use]
pub fn opposite(face: FaceId) -> FaceId {
    let n = face.get();
    AXES.iter()
        .find_map(|axis| {
            if axis.reception == n {
                Some(axis.projection)
            } else if axis.projection == n {
                Some(axis.reception)
            } else {
                None
            }
        })
        .and_then(|id| FaceId::new(id).ok())
        .unwrap_or(face)
}

#[must_use]
pub fn breath_ratio(reception: f64, projection: f64) -> f64 {
    if projection > 0.0 {
        (reception / projection).clamp(0.0, BREATH_RATIO_CAP)
    } else if reception > 0.0 {
        BREATH_RATIO_CAP
    } else {
        1.0
    }
}

fn classify(ratio: f64, band: &BreathBand) -> (BreathTendency, BreathSeverity) {
    if ratio < band.balanced_min {
        let severity = if ratio < CRITICAL_LOW {
            BreathSeverity::Critical
        } else {
            BreathSeverity::Moderate
        };
        (BreathTendency::OverExhaling, severity)
    } else if ratio > band.balanced_max {
        let severity = if ratio > CRITICAL_HIGH {
            BreathSeverity::Critical
        } else {
            BreathSeverity::Moderate
        };
        (BreathTendency::OverInhaling, severity)
    } else {
        (BreathTendency::Balanced, BreathSeverity::None)
    }
}

/// Analyze all six axes from face energies indexed by `FaceId::index()`.
#[must_use]
pub fn analyze(energies: &[f64; FACE_COUNT], band: &BreathBand) -> BreathSummary {
    let axes: Vec<AxisSnapshot> = AXES
        .iter()
        .filter_map(|spec| {
            let reception_face = FaceId::new(spec.reception).ok()?;
            let projection_face = FaceId::new(spec.projection).ok()?;
            let reception_energy = energies[reception_face.index()];
            let projection_energy = energies[projection_face.index()];
            let ratio = breath_ratio(reception_energy, projection_energy);
            let (tendency, severity) = classify(ratio, band);
            Some(AxisSnapshot {
                name: spec.name.to_string(),
                reception_face,
                projection_face,
                reception_energy,
                projection_energy,
                ratio,
                tendency,
                severity,
                tension: (ratio - 1.0).abs(),
            })
        })
        .collect();

    let count = |tendency: BreathTendency| axes.iter().filter(|a| a.tendency == tendency).count();
    let balanced_axes = count(BreathTendency::Balanced);
    let over_exhaling = count(BreathTendency::OverExhaling);
    let over_inhaling = count(BreathTendency::OverInhaling);
    let critical_axes = axes
        .iter()
        .filter(|a| a.severity == BreathSeverity::Critical)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let mean_tension = if axes.is_empty() {
        0.0
    } else {
        axes.iter().map(|a| a.tension).sum::<f64>() / axes.len() as f64
    };

    let dominant_tendency = if over_exhaling > over_inhaling + 1 {
        BreathTendency::OverExhaling
    } else if over_inhaling > over_exhaling + 1 {
        BreathTendency::OverInhaling
    } else {
        BreathTendency::Mixed
    };

    BreathSummary {
        breath_health: 1.0 - mean_tension.min(1.0),
        balanced_axes,
        over_exhaling,
        over_inhaling,
        critical_axes,
        dominant_tendency,
        axes,
    }
}
