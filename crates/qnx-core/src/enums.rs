//! KPI directions, health bands, edge elements, and flow/vortex directions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Enums that arrive from loader rows implement [`FromStr`] with lenient,
//! case-insensitive matching so tabular and JSON sources can share one parser.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way a KPI improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Higher values are better.
    Increasing,
    /// Lower values are better.
    Decreasing,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    /// Accepts `increasing`, `up`, `higher`, `↑` and `decreasing`, `down`, `lower`, `↓`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increasing" | "up" | "higher" | "↑" => Ok(Self::Increasing),
            "decreasing" | "down" | "lower" | "↓" => Ok(Self::Decreasing),
            _ => Err(CoreError::Unrecognized {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// HealthStatus
// ---------------------------------------------------------------------------

/// Health band of a face, ordered from worst to best.
///
/// ```text
/// critical < stressed < stable < thriving
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Critical,
    Stressed,
    Stable,
    Thriving,
}

impl HealthStatus {
    /// Bands in ascending order.
    pub const ALL: [Self; 4] = [Self::Critical, Self::Stressed, Self::Stable, Self::Thriving];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Stressed => "stressed",
            Self::Stable => "stable",
            Self::Thriving => "thriving",
        }
    }

    /// Whether the band counts as healthy in summary statistics.
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Stable | Self::Thriving)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// Elemental tag carried by each edge. Fixed by topology position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Earth,
    Water,
    Fire,
    Air,
    Ether,
}

impl Element {
    pub const ALL: [Self; 5] = [Self::Earth, Self::Water, Self::Fire, Self::Air, Self::Ether];

    /// Scale applied to an edge's tension when its faces are neither both
    /// strong nor both weak.
    #[must_use]
    pub const fn tension_multiplier(self) -> f64 {
        match self {
            Self::Fire => 1.3,
            Self::Air => 1.1,
            Self::Ether => 1.0,
            Self::Water => 0.9,
            Self::Earth => 0.8,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earth => "earth",
            Self::Water => "water",
            Self::Fire => "fire",
            Self::Air => "air",
            Self::Ether => "ether",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|element| element.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::Unrecognized {
                kind: "element",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// FlowDirection
// ---------------------------------------------------------------------------

/// Dominant direction of energy across an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// Face A carries more energy than face B.
    AToB,
    /// Face B carries more energy than face A.
    BToA,
    Balanced,
}

impl FlowDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AToB => "a_to_b",
            Self::BToA => "b_to_a",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative state of an edge, derived from both face energies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatus {
    /// Both faces strong.
    Synergetic,
    /// Both faces weak.
    Depleted,
    /// A wide gap drives energy across the edge.
    Flowing,
    Stable,
}

impl EdgeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synergetic => "synergetic",
            Self::Depleted => "depleted",
            Self::Flowing => "flowing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VortexDirection
// ---------------------------------------------------------------------------

/// Spin of a vertex. Fixed by topology position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VortexDirection {
    Clockwise,
    CounterClockwise,
}

impl VortexDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::CounterClockwise => "counter_clockwise",
        }
    }

    /// The opposite spin.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

impl fmt::Display for VortexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VortexDirection {
    type Err = CoreError;

    /// Accepts `clockwise`/`cw` and `counter_clockwise`/`counterclockwise`/`ccw`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "clockwise" | "cw" => Ok(Self::Clockwise),
            "counter_clockwise" | "counterclockwise" | "ccw" => Ok(Self::CounterClockwise),
            _ => Err(CoreError::Unrecognized {
                kind: "vortex direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Label for a vertex's vortex energy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VortexStatus {
    Stagnant,
    WeakSwirl,
    ActiveFlow,
    RadiantVortex,
}

impl VortexStatus {
    /// Bands are exclusive at the lower edge: exactly 0.8 is `ActiveFlow`.
    #[must_use]
    pub fn from_energy(energy: f64) -> Self {
        match energy {
            e if e > 0.8 => Self::RadiantVortex,
            e if e > 0.5 => Self::ActiveFlow,
            e if e > 0.3 => Self::WeakSwirl,
            _ => Self::Stagnant,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stagnant => "stagnant",
            Self::WeakSwirl => "weak_swirl",
            Self::ActiveFlow => "active_flow",
            Self::RadiantVortex => "radiant_vortex",
        }
    }
}

impl fmt::Display for VortexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CoherenceStatus
// ---------------------------------------------------------------------------

/// Human-readable label for a global coherence score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceStatus {
    Crisis,
    Critical,
    Concerning,
    Fair,
    Moderate,
    Healthy,
    Excellent,
    Exceptional,
}

impl CoherenceStatus {
    /// Classify a coherence score. Non-finite scores classify as `Crisis`.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.9 => Self::Exceptional,
            s if s >= 0.8 => Self::Excellent,
            s if s >= 0.7 => Self::Healthy,
            s if s >= 0.6 => Self::Moderate,
            s if s >= 0.5 => Self::Fair,
            s if s >= 0.4 => Self::Concerning,
            s if s >= 0.3 => Self::Critical,
            _ => Self::Crisis,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crisis => "crisis",
            Self::Critical => "critical",
            Self::Concerning => "concerning",
            Self::Fair => "fair",
            Self::Moderate => "moderate",
            Self::Healthy => "healthy",
            Self::Excellent => "excellent",
            Self::Exceptional => "exceptional",
        }
    }
}

impl fmt::Display for CoherenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BreathTendency / BreathSeverity
// ---------------------------------------------------------------------------

/// Balance between the reception and projection faces of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BreathTendency {
    /// Projection outweighs reception: depletion risk.
    OverExhaling,
    /// Reception outweighs projection: stagnation risk.
    OverInhaling,
    Balanced,
    /// Used only for the overall tendency when neither side dominates.
    Mixed,
}

impl BreathTendency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OverExhaling => "over_exhaling",
            Self::OverInhaling => "over_inhaling",
            Self::Balanced => "balanced",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for BreathTendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far an axis sits outside its balanced band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BreathSeverity {
    None,
    Moderate,
    Critical,
}

impl BreathSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderate => "moderate",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for BreathSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ShadowSeverity / IntegrityStatus
// ---------------------------------------------------------------------------

/// Strength of a detected shadow pattern, from the gap between its strong
/// and weak faces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ShadowSeverity {
    Moderate,
    High,
    Critical,
}

impl ShadowSeverity {
    #[must_use]
    pub fn from_gap(gap: f64) -> Self {
        match gap {
            g if g > 0.6 => Self::Critical,
            g if g > 0.4 => Self::High,
            _ => Self::Moderate,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ShadowSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for the system integrity score left after shadow patterns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityStatus {
    Critical,
    Concerning,
    Good,
    Excellent,
}

impl IntegrityStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Concerning => "concerning",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
