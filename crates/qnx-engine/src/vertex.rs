//! Vertices: convergence points of three faces.

use qnx_core::enums::{VortexDirection, VortexStatus};
use qnx_core::ids::FaceId;
use qnx_core::snapshot::VertexSnapshot;

/// Thresholds for flagging a vertex as a leverage point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverageThresholds {
    pub coherence_min: f64,
    pub variance_max: f64,
}

impl Default for LeverageThresholds {
    fn default() -> Self {
        Self {
            coherence_min: qnx_config::DEFAULT_LEVERAGE_COHERENCE_MIN,
            variance_max: qnx_config::DEFAULT_LEVERAGE_VARIANCE_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: String,
    faces: [FaceId; 3],
    vortex_direction: VortexDirection,
    coherence: f64,
    is_leverage_point: bool,
    momentum: f64,
    vortex_energy: f64,
    status: VortexStatus,
}

impl Vertex {
    #[must_use]
    pub fn new(id: impl Into<String>, faces: [FaceId; 3], vortex_direction: VortexDirection) -> Self {
        Self {
            id: id.into(),
            faces,
            vortex_direction,
            coherence: 0.0,
            is_leverage_point: false,
            momentum: 0.0,
            vortex_energy: 0.0,
            status: VortexStatus::Stagnant,
        }
    }

    pub fn recompute(&mut self, energies: [f64; 3], thresholds: &LeverageThresholds) {
        self.coherence = harmonic_mean(energies);
        self.is_leverage_point = self.coherence >= thresholds.coherence_min
            && population_variance(energies) <= thresholds.variance_max;
        self.momentum = momentum(energies);
        self.vortex_energy = vortex_energy(energies);
        self.status = VortexStatus::from_energy(self.vortex_energy);
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn faces(&self) -> [FaceId; 3] {
        self.faces
    }

    #[must_use]
    pub const fn vortex_direction(&self) -> VortexDirection {
        self.vortex_direction
    }

    #[must_use]
    pub const fn coherence(&self) -> f64 {
        self.coherence
    }

    #[must_use]
    pub const fn is_leverage_point(&self) -> bool {
        self.is_leverage_point
    }

    #[must_use]
    pub const fn momentum(&self) -> f64 {
        self.momentum
    }

    #[must_use]
    pub const fn vortex_energy(&self) -> f64 {
        self.vortex_energy
    }

    #[must_use]
    pub const fn status(&self) -> VortexStatus {
        self.status
    }

    #[must_use]
    pub fn to_snapshot(&self) -> VertexSnapshot {
        VertexSnapshot {
            id: self.id.clone(),
            face_ids: self.faces,
            vortex_direction: self.vortex_direction,
            coherence: self.coherence,
            is_leverage_point: self.is_leverage_point,
            momentum: self.momentum,
            vortex_energy: self.vortex_energy,
            status: self.status,
        }
    }
}

/// Harmonic mean of three energies. A single dead face collapses the vertex.
#[must_use]
pub fn harmonic_mean(energies: [f64; 3]) -> f64 {
    if energies.iter().any(|e| *e <= 0.0 || !e.is_finite()) {
        return 0.0;
    }
    let reciprocal_sum: f64 = energies.iter().map(|e| 1.0 / e).sum();
    (3.0 / reciprocal_sum).clamp(0.0, 1.0)
}

#[must_use]
pub fn population_variance(energies: [f64; 3]) -> f64 {
    let mean = energies.iter().sum::<f64>() / 3.0;
    energies.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / 3.0
}

/// Upward (positive) or downward (negative) spiral around the midpoint.
#[must_use]
pub fn momentum(energies: [f64; 3]) -> f64 {
    let mean = energies.iter().sum::<f64>() / 3.0;
    ((mean - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Mean energy damped by the weakest face.
#[must_use]
pub fn vortex_energy(energies: [f64; 3]) -> f64 {
    let avg = energies.iter().sum::<f64>() / 3.0;
    if avg <= 0.0 || !avg.is_finite() {
        return 0.0;
    }
    let min = energies.iter().copied().fold(f64::INFINITY, f64::min).max(0.0);
    (avg * (min / avg).sqrt()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vertex() -> Vertex {
        Vertex::new(
            "V01",
            [
                FaceId::new(1).unwrap(),
                FaceId::new(2).unwrap(),
                FaceId::new(3).unwrap(),
            ],
            VortexDirection::Clockwise,
        )
    }

    #[test]
    fn harmonic_mean_of_equal_energies_is_that_energy() {
        assert!((harmonic_mean([0.6, 0.6, 0.6]) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn harmonic_mean_penalizes_imbalance() {
        let balanced = harmonic_mean([0.5, 0.5, 0.5]);
        let skewed = harmonic_mean([0.1, 0.5, 0.9]);
        assert!(skewed < balanced);
        assert!(skewed > 0.0);
    }

    #[test]
    fn any_dead_face_zeroes_coherence() {
        assert!(harmonic_mean([0.0, 0.9, 0.9]).abs() < f64::EPSILON);
    }

    #[test]
    fn leverage_requires_high_and_even_energy() {
        let thresholds = LeverageThresholds::default();

        let mut v = vertex();
        v.recompute([0.8, 0.82, 0.78], &thresholds);
        assert!(v.is_leverage_point());

        v.recompute([0.6, 0.62, 0.58], &thresholds);
        assert!(!v.is_leverage_point(), "coherence below threshold");

        v.recompute([0.95, 0.95, 0.6], &thresholds);
        assert!(!v.is_leverage_point(), "variance above threshold");
    }

    #[test]
    fn momentum_spans_minus_one_to_one() {
        assert!((momentum([0.0, 0.0, 0.0]) + 1.0).abs() < 1e-12);
        assert!((momentum([1.0, 1.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!(momentum([0.5, 0.5, 0.5]).abs() < 1e-12);
    }

    #[test]
    fn variance_of_identical_energies_is_zero() {
        assert!(population_variance([0.4, 0.4, 0.4]).abs() < 1e-15);
    }

    #[rstest]
    #[case([0.8, 0.8, 0.8], 0.8, VortexStatus::ActiveFlow)]
    #[case([0.9, 0.9, 0.9], 0.9, VortexStatus::RadiantVortex)]
    #[case([0.0, 0.9, 0.9], 0.0, VortexStatus::Stagnant)]
    #[case([0.0, 0.0, 0.0], 0.0, VortexStatus::Stagnant)]
    #[case([0.4, 0.6, 0.8], 0.489_897_948_556_635_6, VortexStatus::WeakSwirl)]
    #[case([0.3, 0.3, 0.3], 0.3, VortexStatus::Stagnant)]
    fn vortex_energy_thresholds(
        #[case] energies: [f64; 3],
        #[case] expected_energy: f64,
        #[case] expected_status: VortexStatus,
    ) {
        let mut v = vertex();
        v.recompute(energies, &LeverageThresholds::default());
        assert!((v.vortex_energy() - expected_energy).abs() < 1e-9, "{}", v.vortex_energy());
        assert_eq!(v.status(), expected_status);
        assert_eq!(v.to_snapshot().status, expected_status);
    }
}
