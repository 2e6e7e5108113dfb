//! KPI records and their normalization to `[0, 1]`.

use qnx_core::enums::Direction;
use qnx_core::ids::FaceId;
use qnx_core::snapshot::KpiSnapshot;

use crate::error::EngineError;

/// One measured indicator owned by exactly one face.
///
/// Bounds are fixed at construction; only `value` changes afterwards, and
/// every change recomputes `normalized_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRecord {
    id: String,
    name: Option<String>,
    face_id: FaceId,
    value: f64,
    target_min: f64,
    target_ideal: f64,
    direction: Direction,
    normalized_score: f64,
}

impl KpiRecord {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRange`] when the bounds are equal or
    /// non-finite, or when a `Decreasing` KPI has `target_ideal` above
    /// `target_min`. Returns [`EngineError::InvalidValue`] for a non-finite
    /// value.
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        face_id: FaceId,
        value: f64,
        target_min: f64,
        target_ideal: f64,
        direction: Direction,
    ) -> Result<Self, EngineError> {
        let id = id.into();
        #[allow(clippy::float_cmp)]
        let degenerate = target_min == target_ideal;
        let inverted = direction == Direction::Decreasing && target_ideal > target_min;
        if degenerate || inverted || !target_min.is_finite() || !target_ideal.is_finite() {
            return Err(EngineError::InvalidRange {
                kpi_id: id,
                target_min,
                target_ideal,
            });
        }
        if !value.is_finite() {
            return Err(EngineError::InvalidValue { kpi_id: id, value });
        }

        Ok(Self {
            normalized_score: normalize(value, target_min, target_ideal, direction),
            id,
            name,
            face_id,
            value,
            target_min,
            target_ideal,
            direction,
        })
    }

    /// Store `value` verbatim and recompute the score.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidValue`] for NaN or infinite input; the
    /// record is left unchanged.
    pub fn set_value(&mut self, value: f64) -> Result<(), EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidValue {
                kpi_id: self.id.clone(),
                value,
            });
        }
        self.value = value;
        self.normalized_score = normalize(value, self.target_min, self.target_ideal, self.direction);
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn face_id(&self) -> FaceId {
        self.face_id
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn normalized_score(&self) -> f64 {
        self.normalized_score
    }

    /// The value at which this KPI scores exactly 1.
    #[must_use]
    pub const fn full_score_value(&self) -> f64 {
        self.target_ideal
    }

    #[must_use]
    pub fn to_snapshot(&self) -> KpiSnapshot {
        KpiSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            face_id: self.face_id,
            value: self.value,
            target_min: self.target_min,
            target_ideal: self.target_ideal,
            direction: self.direction,
            normalized_score: self.normalized_score,
        }
    }
}

/// Map a raw value onto `[0, 1]`.
///
/// `target_ideal` scores 1 and `target_min` scores 0 in both directions.
/// `Increasing` interpolates `(value - target_min) / (target_ideal -
/// target_min)`; `Decreasing` expects `target_ideal < target_min` and
/// interpolates `(target_min - value) / (target_min - target_ideal)`.
/// Degenerate or non-finite input scores 0.
#[must_use]
pub fn normalize(value: f64, target_min: f64, target_ideal: f64, direction: Direction) -> f64 {
    let raw = match direction {
        Direction::Increasing => (value - target_min) / (target_ideal - target_min),
        Direction::Decreasing => (target_min - value) / (target_min - target_ideal),
    };
    if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn face() -> FaceId {
        FaceId::new(1).unwrap()
    }

    fn record(value: f64, min: f64, ideal: f64, direction: Direction) -> KpiRecord {
        KpiRecord::new("k", None, face(), value, min, ideal, direction).unwrap()
    }

    #[test]
    fn midpoint_increasing_scores_half() {
        let kpi = record(50.0, 0.0, 100.0, Direction::Increasing);
        assert!((kpi.normalized_score() - 0.5).abs() < 1e-12);
    }

    #[rstest]
    #[case(-10.0, 0.0)]
    #[case(0.0, 0.0)]
    #[case(100.0, 1.0)]
    #[case(250.0, 1.0)]
    fn increasing_clamps(#[case] value: f64, #[case] expected: f64) {
        let kpi = record(value, 0.0, 100.0, Direction::Increasing);
        assert!((kpi.normalized_score() - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(2.5, 0.75)]
    #[case(10.0, 0.0)]
    #[case(15.0, 0.0)]
    #[case(-3.0, 1.0)]
    fn decreasing_rewards_lower_values(#[case] value: f64, #[case] expected: f64) {
        // Worst at 10, ideal at 0.
        let kpi = record(value, 10.0, 0.0, Direction::Decreasing);
        assert!((kpi.normalized_score() - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(-5.0, 20.0)]
    fn decreasing_with_ideal_above_min_is_rejected(#[case] min: f64, #[case] ideal: f64) {
        let err = KpiRecord::new("inv", None, face(), 2.0, min, ideal, Direction::Decreasing)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { ref kpi_id, .. } if kpi_id == "inv"));
    }

    #[test]
    fn increasing_with_ideal_above_min_still_scores_toward_ideal() {
        let mut kpi = record(2.0, 0.0, 10.0, Direction::Increasing);
        let before = kpi.normalized_score();
        kpi.set_value(10.0).unwrap();
        assert!(kpi.normalized_score() > before);
        assert!((kpi.normalized_score() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn decreasing_ideal_scores_one_and_min_scores_zero() {
        assert!((normalize(0.0, 10.0, 0.0, Direction::Decreasing) - 1.0).abs() < 1e-12);
        assert!(normalize(10.0, 10.0, 0.0, Direction::Decreasing).abs() < 1e-12);
        assert!((normalize(4.0, 10.0, 0.0, Direction::Decreasing) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn score_is_monotone_toward_ideal() {
        let mut kpi = record(20.0, 0.0, 100.0, Direction::Increasing);
        let before = kpi.normalized_score();
        kpi.set_value(40.0).unwrap();
        assert!(kpi.normalized_score() >= before);

        let mut kpi = record(8.0, 10.0, 0.0, Direction::Decreasing);
        let before = kpi.normalized_score();
        kpi.set_value(3.0).unwrap();
        assert!(kpi.normalized_score() >= before);
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let err = KpiRecord::new("flat", None, face(), 1.0, 5.0, 5.0, Direction::Increasing)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { ref kpi_id, .. } if kpi_id == "flat"));
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let err = KpiRecord::new("inf", None, face(), 1.0, 0.0, f64::INFINITY, Direction::Increasing)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));
    }

    #[test]
    fn set_value_stores_raw_value_unclamped() {
        let mut kpi = record(50.0, 0.0, 100.0, Direction::Increasing);
        kpi.set_value(180.0).unwrap();
        assert!((kpi.value() - 180.0).abs() < f64::EPSILON);
        assert!((kpi.normalized_score() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_value_rejects_nan_without_mutation() {
        let mut kpi = record(50.0, 0.0, 100.0, Direction::Increasing);
        assert!(kpi.set_value(f64::NAN).is_err());
        assert!((kpi.value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_score_value_reaches_one() {
        let up = record(10.0, 0.0, 100.0, Direction::Increasing);
        assert!((normalize(up.full_score_value(), 0.0, 100.0, Direction::Increasing) - 1.0).abs() < 1e-12);

        let down = record(7.0, 10.0, 2.0, Direction::Decreasing);
        assert!((down.full_score_value() - 2.0).abs() < f64::EPSILON);
        assert!((normalize(2.0, 10.0, 2.0, Direction::Decreasing) - 1.0).abs() < 1e-12);
    }
}
