//! Scoring policy: health bands, flow and leverage thresholds, coherence weights.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lower bounds of the Stressed, Stable, and Thriving bands.
pub const DEFAULT_HEALTH_CUT_POINTS: [f64; 3] = [0.25, 0.5, 0.75];

/// Energy difference below which an edge is considered balanced.
pub const DEFAULT_FLOW_EPSILON: f64 = 0.02;

/// Minimum vertex coherence for a leverage point.
pub const DEFAULT_LEVERAGE_COHERENCE_MIN: f64 = 0.7;

/// Maximum population variance of a leverage point's three energies.
pub const DEFAULT_LEVERAGE_VARIANCE_MAX: f64 = 0.01;

pub const DEFAULT_FACE_WEIGHT: f64 = 0.6;
pub const DEFAULT_VERTEX_WEIGHT: f64 = 0.4;

/// Balanced band for an axis reception/projection ratio.
pub const DEFAULT_BREATH_BALANCED_MIN: f64 = 0.8;
pub const DEFAULT_BREATH_BALANCED_MAX: f64 = 1.2;

const fn default_health_cut_points() -> [f64; 3] {
    DEFAULT_HEALTH_CUT_POINTS
}

const fn default_flow_epsilon() -> f64 {
    DEFAULT_FLOW_EPSILON
}

const fn default_leverage_coherence_min() -> f64 {
    DEFAULT_LEVERAGE_COHERENCE_MIN
}

const fn default_leverage_variance_max() -> f64 {
    DEFAULT_LEVERAGE_VARIANCE_MAX
}

const fn default_face_weight() -> f64 {
    DEFAULT_FACE_WEIGHT
}

const fn default_vertex_weight() -> f64 {
    DEFAULT_VERTEX_WEIGHT
}

const fn default_breath_balanced_min() -> f64 {
    DEFAULT_BREATH_BALANCED_MIN
}

const fn default_breath_balanced_max() -> f64 {
    DEFAULT_BREATH_BALANCED_MAX
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Three strictly increasing cut points inside `(0, 1)`.
    #[serde(default = "default_health_cut_points")]
    pub health_cut_points: [f64; 3],

    #[serde(default = "default_flow_epsilon")]
    pub flow_epsilon: f64,

    #[serde(default = "default_leverage_coherence_min")]
    pub leverage_coherence_min: f64,

    #[serde(default = "default_leverage_variance_max")]
    pub leverage_variance_max: f64,

    /// Weight of the mean face energy in global coherence.
    #[serde(default = "default_face_weight")]
    pub face_weight: f64,

    /// Weight of the mean vertex coherence in global coherence.
    #[serde(default = "default_vertex_weight")]
    pub vertex_weight: f64,

    #[serde(default = "default_breath_balanced_min")]
    pub breath_balanced_min: f64,

    #[serde(default = "default_breath_balanced_max")]
    pub breath_balanced_max: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            health_cut_points: default_health_cut_points(),
            flow_epsilon: default_flow_epsilon(),
            leverage_coherence_min: default_leverage_coherence_min(),
            leverage_variance_max: default_leverage_variance_max(),
            face_weight: default_face_weight(),
            vertex_weight: default_vertex_weight(),
            breath_balanced_min: default_breath_balanced_min(),
            breath_balanced_max: default_breath_balanced_max(),
        }
    }
}

impl ScoringConfig {
    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [a, b, c] = self.health_cut_points;
        if !(0.0 < a && a < b && b < c && c < 1.0) {
            return Err(ConfigError::invalid(
                "scoring.health_cut_points",
                format!("expected strictly increasing values inside (0, 1), got [{a}, {b}, {c}]"),
            ));
        }

        non_negative("scoring.flow_epsilon", self.flow_epsilon)?;
        non_negative("scoring.leverage_variance_max", self.leverage_variance_max)?;
        non_negative("scoring.face_weight", self.face_weight)?;
        non_negative("scoring.vertex_weight", self.vertex_weight)?;

        if !(0.0..=1.0).contains(&self.leverage_coherence_min) {
            return Err(ConfigError::invalid(
                "scoring.leverage_coherence_min",
                format!("expected a value in [0, 1], got {}", self.leverage_coherence_min),
            ));
        }

        if self.face_weight + self.vertex_weight <= 0.0 {
            return Err(ConfigError::invalid(
                "scoring.face_weight",
                "face_weight and vertex_weight must not both be zero",
            ));
        }

        let (lo, hi) = (self.breath_balanced_min, self.breath_balanced_max);
        if !(lo.is_finite() && hi.is_finite() && 0.0 < lo && lo <= 1.0 && 1.0 <= hi && lo < hi) {
            return Err(ConfigError::invalid(
                "scoring.breath_balanced_min",
                format!("expected 0 < min <= 1 <= max, got [{lo}, {hi}]"),
            ));
        }

        Ok(())
    }

    /// Face and vertex weights scaled to sum to 1.
    #[must_use]
    pub fn normalized_weights(&self) -> (f64, f64) {
        let total = self.face_weight + self.vertex_weight;
        if total > 0.0 {
            (self.face_weight / total, self.vertex_weight / total)
        } else {
            (DEFAULT_FACE_WEIGHT, DEFAULT_VERTEX_WEIGHT)
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("expected a finite, non-negative value, got {value}"),
        ))
    }
}
