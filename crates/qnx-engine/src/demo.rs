//! A small bundled dataset: two or three KPIs on every face.

use qnx_core::rows::RawRow;

use crate::loader::StaticLoader;

/// `(id, name, face, value, target_min, target_ideal, direction)`
type DemoKpi = (&'static str, &'static str, u8, f64, f64, f64, &'static str);

const DEMO_KPIS: &[DemoKpi] = &[
    ("fin-runway", "Cash runway (months)", 1, 9.0, 3.0, 18.0, "increasing"),
    ("fin-margin", "Gross margin (%)", 1, 52.0, 20.0, 70.0, "increasing"),
    ("ip-patents", "Active patents", 2, 4.0, 0.0, 10.0, "increasing"),
    ("ip-docs", "Documented processes (%)", 2, 65.0, 10.0, 90.0, "increasing"),
    ("hc-engagement", "Engagement score", 3, 7.2, 4.0, 9.0, "increasing"),
    ("hc-attrition", "Annual attrition (%)", 3, 14.0, 30.0, 5.0, "decreasing"),
    ("sc-uptime", "Systems uptime (%)", 4, 99.2, 95.0, 99.9, "increasing"),
    ("sc-debt", "Tech debt backlog (items)", 4, 40.0, 120.0, 10.0, "decreasing"),
    ("mr-nps", "Net promoter score", 5, 31.0, -20.0, 70.0, "increasing"),
    ("mr-churn", "Customer churn (%)", 5, 6.0, 20.0, 2.0, "decreasing"),
    ("cp-partners", "Active partners", 6, 12.0, 0.0, 25.0, "increasing"),
    ("cp-events", "Community events / quarter", 6, 3.0, 0.0, 8.0, "increasing"),
    ("br-sentiment", "Brand sentiment (%)", 7, 58.0, 20.0, 85.0, "increasing"),
    ("br-awareness", "Aided awareness (%)", 7, 18.0, 5.0, 50.0, "increasing"),
    ("ops-cycle", "Order cycle time (days)", 8, 6.0, 20.0, 2.0, "decreasing"),
    ("ops-defects", "Defect rate (%)", 8, 1.8, 8.0, 0.5, "decreasing"),
    ("rf-renewable", "Renewable energy share (%)", 9, 35.0, 0.0, 100.0, "increasing"),
    ("rf-waste", "Waste to landfill (t)", 9, 22.0, 60.0, 5.0, "decreasing"),
    ("fv-alignment", "Values alignment survey", 10, 7.8, 4.0, 9.5, "increasing"),
    ("fv-incidents", "Ethics incidents", 10, 1.0, 10.0, 0.0, "decreasing"),
    ("fp-pipeline", "Qualified pipeline (M)", 11, 2.4, 0.5, 6.0, "increasing"),
    ("fp-win", "Win rate (%)", 11, 22.0, 5.0, 40.0, "increasing"),
    ("rr-coverage", "Risk register coverage (%)", 12, 70.0, 20.0, 100.0, "increasing"),
    ("rr-recovery", "Recovery time objective (h)", 12, 12.0, 72.0, 4.0, "decreasing"),
    ("rr-audit", "Open audit findings", 12, 5.0, 20.0, 0.0, "decreasing"),
];

#[must_use]
pub fn demo_kpi_rows() -> Vec<RawRow> {
    DEMO_KPIS
        .iter()
        .map(|&(id, name, face, value, min, ideal, direction)| {
            RawRow::new()
                .with("id", id)
                .with("name", name)
                .with("faceId", face)
                .with("value", value)
                .with("targetMin", min)
                .with("targetIdeal", ideal)
                .with("direction", direction)
        })
        .collect()
}

/// Demo KPIs over the built-in topology.
#[must_use]
pub fn demo_loader() -> StaticLoader {
    StaticLoader::new(demo_kpi_rows())
}
