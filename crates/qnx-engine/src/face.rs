//! Faces: the twelve organizational functions and their energy.

use std::collections::BTreeMap;

use qnx_core::enums::HealthStatus;
use qnx_core::ids::FaceId;
use qnx_core::snapshot::FaceSnapshot;

use crate::kpi::KpiRecord;

/// Cut points separating the four health bands.
///
/// Energy below `cut_points[0]` is Critical, below `[1]` Stressed, below
/// `[2]` Stable, otherwise Thriving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBands {
    cut_points: [f64; 3],
}

impl HealthBands {
    #[must_use]
    pub const fn new(cut_points: [f64; 3]) -> Self {
        Self { cut_points }
    }

    #[must_use]
    pub fn classify(&self, energy: f64) -> HealthStatus {
        let [stressed, stable, thriving] = self.cut_points;
        match energy {
            e if e >= thriving => HealthStatus::Thriving,
            e if e >= stable => HealthStatus::Stable,
            e if e >= stressed => HealthStatus::Stressed,
            _ => HealthStatus::Critical,
        }
    }
}

impl Default for HealthBands {
    fn default() -> Self {
        Self::new(qnx_config::DEFAULT_HEALTH_CUT_POINTS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    id: FaceId,
    name: String,
    kpi_ids: Vec<String>,
    energy: f64,
    health_status: HealthStatus,
    critical_kpi: Option<String>,
}

impl Face {
    #[must_use]
    pub fn new(id: FaceId) -> Self {
        Self {
            id,
            name: id.default_name().to_string(),
            kpi_ids: Vec::new(),
            energy: 0.0,
            health_status: HealthStatus::Critical,
            critical_kpi: None,
        }
    }

    pub(crate) fn push_kpi(&mut self, kpi_id: impl Into<String>) {
        self.kpi_ids.push(kpi_id.into());
    }

    /// Recompute energy, band, and critical KPI from the owned records.
    ///
    /// Energy is the arithmetic mean of the owned scores; a face with no KPIs
    /// has energy 0.
    pub fn recompute(&mut self, kpis: &BTreeMap<String, KpiRecord>, bands: &HealthBands) {
        let owned = self.kpi_ids.iter().filter_map(|id| kpis.get(id));

        let mut sum = 0.0;
        let mut count = 0_u32;
        let mut weakest: Option<&KpiRecord> = None;
        for kpi in owned {
            sum += kpi.normalized_score();
            count += 1;
            let replace = weakest.is_none_or(|current| {
                kpi.normalized_score()
                    .total_cmp(&current.normalized_score())
                    .then_with(|| kpi.id().cmp(current.id()))
                    .is_lt()
            });
            if replace {
                weakest = Some(kpi);
            }
        }

        self.energy = if count == 0 {
            0.0
        } else {
            (sum / f64::from(count)).clamp(0.0, 1.0)
        };
        self.health_status = bands.classify(self.energy);
        self.critical_kpi = weakest.map(|kpi| kpi.id().to_string());
    }

    #[must_use]
    pub const fn id(&self) -> FaceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kpi_ids(&self) -> &[String] {
        &self.kpi_ids
    }

    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    #[must_use]
    pub const fn health_status(&self) -> HealthStatus {
        self.health_status
    }

    #[must_use]
    pub fn critical_kpi(&self) -> Option<&str> {
        self.critical_kpi.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kpi_ids.is_empty()
    }

    #[must_use]
    pub fn to_snapshot(&self, kpis: &BTreeMap<String, KpiRecord>) -> FaceSnapshot {
        FaceSnapshot {
            id: self.id,
            name: self.name.clone(),
            energy: self.energy,
            health_status: self.health_status,
            is_empty: self.is_empty(),
            critical_kpi: self.critical_kpi.clone(),
            kpis: self
                .kpi_ids
                .iter()
                .filter_map(|id| kpis.get(id))
                .map(KpiRecord::to_snapshot)
                .collect(),
        }
    }
}
