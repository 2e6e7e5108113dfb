//! Face identifiers and default face names.
//!
//! The dodecahedron has exactly 12 faces, identified `1..=12`. Loader rows
//! spell them several ways (`7`, `F7`, `Face 7`, `7.0`); [`FaceId`]'s
//! [`FromStr`] accepts all of them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Number of faces on a dodecahedron.
pub const FACE_COUNT: usize = 12;

/// Default display names, indexed by `FaceId::index()`.
pub const DEFAULT_FACE_NAMES: [&str; FACE_COUNT] = [
    "Financial Capital",
    "Intellectual Capital",
    "Human Capital",
    "Structural Capital",
    "Market Resonance",
    "Community & Partners",
    "Brand & Reputation",
    "Core Operations",
    "Regenerative Flow",
    "Foundational Values",
    "Funding Pipeline",
    "Risk & Resilience",
];

/// One of the 12 fixed face identifiers.
///
/// Serializes as a bare integer. Deserialization rejects values outside `1..=12`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "u8")]
pub struct FaceId(u8);

impl FaceId {
    /// Construct a face id, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FaceOutOfRange`] for values outside `1..=12`.
    pub fn new(id: u8) -> Result<Self, CoreError> {
        if (1..=12).contains(&id) {
            Ok(Self(id))
        } else {
            Err(CoreError::FaceOutOfRange(i64::from(id)))
        }
    }

    /// All 12 faces in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=12).map(Self)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, suitable for indexing fixed-size face arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    #[must_use]
    pub const fn default_name(self) -> &'static str {
        DEFAULT_FACE_NAMES[self.index()]
    }
}

impl TryFrom<u8> for FaceId {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FaceId> for u8 {
    fn from(id: FaceId) -> Self {
        id.0
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl FromStr for FaceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("Face")
            .or_else(|| trimmed.strip_prefix("face"))
            .or_else(|| trimmed.strip_prefix('F'))
            .or_else(|| trimmed.strip_prefix('f'))
            .unwrap_or(trimmed)
            .trim();

        let number: f64 = digits.parse().map_err(|_| CoreError::Unrecognized {
            kind: "face id",
            value: s.to_string(),
        })?;

        if number.fract() != 0.0 {
            return Err(CoreError::Unrecognized {
                kind: "face id",
                value: s.to_string(),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let whole = number as i64;
        let id = u8::try_from(whole).map_err(|_| CoreError::FaceOutOfRange(whole))?;
        Self::new(id)
    }
}
