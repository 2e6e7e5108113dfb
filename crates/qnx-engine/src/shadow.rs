//! Shadow patterns: a strong face whose strength hides a weak one.
//!
//! Each pattern names the faces that look healthy and the faces that pay for
//! it. A pattern is active when any of its check faces is at or above the
//! high threshold while any of its shadow faces is at or below the low one.
//! Penalties are reported per face; face energies are left untouched.

use std::collections::BTreeMap;

use qnx_core::enums::{IntegrityStatus, ShadowSeverity};
use qnx_core::ids::{FACE_COUNT, FaceId};
use qnx_core::snapshot::{FacePenalty, ShadowPatternSnapshot, ShadowSummary};

/// Most of a face's energy a combination of patterns may claim.
pub const PENALTY_CAP: f64 = 0.9;

const HIGH: f64 = 0.7;
const LOW: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub name: &'static str,
    pub check: &'static [u8],
    pub shadow: &'static [u8],
    pub high: f64,
    pub low: f64,
    pub penalty: f64,
}

pub const PATTERNS: [ShadowSpec; 6] = [
    ShadowSpec {
        name: "Brittle Profit",
        check: &[1, 11],
        shadow: &[12],
        high: HIGH,
        low: LOW,
        penalty: 0.25,
    },
    ShadowSpec {
        name: "Extractive Growth",
        check: &[1, 11],
        shadow: &[9],
        high: HIGH,
        low: LOW,
        penalty: 0.30,
    },
    ShadowSpec {
        name: "Experience Gap",
        check: &[7, 5],
        shadow: &[8, 3],
        high: HIGH,
        low: LOW,
        penalty: 0.35,
    },
    ShadowSpec {
        name: "Burnout Engine",
        check: &[8],
        shadow: &[3],
        high: HIGH,
        low: LOW,
        penalty: 0.40,
    },
    ShadowSpec {
        name: "Hollow Governance",
        check: &[4],
        shadow: &[10],
        high: HIGH,
        low: LOW,
        penalty: 0.20,
    },
    // Wider low band on resilience than Brittle Profit.
    ShadowSpec {
        name: "Lonely Hero",
        check: &[2],
        shadow: &[12],
        high: HIGH,
        low: 0.5,
        penalty: 0.30,
    },
];

fn faces(ids: &'static [u8]) -> impl Iterator<Item = FaceId> {
    ids.iter().filter_map(|id| FaceId::new(*id).ok())
}

fn detect(spec: &ShadowSpec, energies: &[f64; FACE_COUNT]) -> Option<ShadowPatternSnapshot> {
    let energy = |face: &FaceId| energies[face.index()];
    let strong: Vec<FaceId> = faces(spec.check)
        .filter(|face| energy(face) >= spec.high)
        .collect();
    let weak: Vec<FaceId> = faces(spec.shadow)
        .filter(|face| energy(face) <= spec.low)
        .collect();
    if strong.is_empty() || weak.is_empty() {
        return None;
    }

    let top = strong.iter().map(energy).fold(f64::NEG_INFINITY, f64::max);
    let bottom = weak.iter().map(energy).fold(f64::INFINITY, f64::min);
    let gap = top - bottom;
    Some(ShadowPatternSnapshot {
        name: spec.name.to_string(),
        severity: ShadowSeverity::from_gap(gap),
        penalty: spec.penalty,
        affected_faces: strong,
        shadow_faces: weak,
        gap,
    })
}

const fn integrity_weight(severity: ShadowSeverity) -> f64 {
    match severity {
        ShadowSeverity::Critical => 0.3,
        ShadowSeverity::High => 0.2,
        ShadowSeverity::Moderate => 0.1,
    }
}

fn integrity(patterns: &[ShadowPatternSnapshot]) -> (f64, IntegrityStatus) {
    if patterns.is_empty() {
        return (1.0, IntegrityStatus::Excellent);
    }
    let loss: f64 = patterns.iter().map(|p| integrity_weight(p.severity)).sum();
    let score = (1.0 - loss).max(0.0);
    let status = match score {
        s if s >= 0.8 => IntegrityStatus::Good,
        s if s >= 0.6 => IntegrityStatus::Concerning,
        _ => IntegrityStatus::Critical,
    };
    (score, status)
}

/// Detect every pattern in [`PATTERNS`] from face energies indexed by
/// `FaceId::index()`.
#[must_use]
pub fn analyze(energies: &[f64; FACE_COUNT]) -> ShadowSummary {
    let patterns: Vec<ShadowPatternSnapshot> = PATTERNS
        .iter()
        .filter_map(|spec| detect(spec, energies))
        .collect();

    let mut charged: BTreeMap<FaceId, f64> = BTreeMap::new();
    for pattern in &patterns {
        for face in &pattern.affected_faces {
            *charged.entry(*face).or_default() += pattern.penalty;
        }
    }
    let penalties = charged
        .into_iter()
        .map(|(face_id, penalty)| FacePenalty {
            face_id,
            penalty: penalty.min(PENALTY_CAP),
        })
        .collect();

    let (integrity_score, integrity_status) = integrity(&patterns);
    ShadowSummary {
        patterns,
        penalties,
        integrity_score,
        integrity_status,
    }
}
