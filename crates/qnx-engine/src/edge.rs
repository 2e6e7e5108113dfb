//! Edges: relationships between two adjacent faces.

use qnx_core::enums::{EdgeStatus, Element, FlowDirection};
use qnx_core::ids::FaceId;
use qnx_core::snapshot::EdgeSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: String,
    face_a: FaceId,
    face_b: FaceId,
    element: Element,
    breath_ratio: f64,
    flow_direction: FlowDirection,
    tension: f64,
    status: EdgeStatus,
}

impl Edge {
    #[must_use]
    pub fn new(id: impl Into<String>, face_a: FaceId, face_b: FaceId, element: Element) -> Self {
        let (tension, status) = tension(0.0, 0.0, element);
        Self {
            id: id.into(),
            face_a,
            face_b,
            element,
            breath_ratio: 1.0,
            flow_direction: FlowDirection::Balanced,
            tension,
            status,
        }
    }

    pub fn recompute(&mut self, energy_a: f64, energy_b: f64, flow_epsilon: f64) {
        self.breath_ratio = breath_ratio(energy_a, energy_b);
        self.flow_direction = flow_direction(energy_a, energy_b, flow_epsilon);
        (self.tension, self.status) = tension(energy_a, energy_b, self.element);
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn faces(&self) -> (FaceId, FaceId) {
        (self.face_a, self.face_b)
    }

    #[must_use]
    pub const fn element(&self) -> Element {
        self.element
    }

    #[must_use]
    pub const fn breath_ratio(&self) -> f64 {
        self.breath_ratio
    }

    #[must_use]
    pub const fn flow_direction(&self) -> FlowDirection {
        self.flow_direction
    }

    #[must_use]
    pub const fn tension(&self) -> f64 {
        self.tension
    }

    #[must_use]
    pub const fn status(&self) -> EdgeStatus {
        self.status
    }

    #[must_use]
    pub fn to_snapshot(&self) -> EdgeSnapshot {
        EdgeSnapshot {
            id: self.id.clone(),
            face_a_id: self.face_a,
            face_b_id: self.face_b,
            element: self.element,
            breath_ratio: self.breath_ratio,
            flow_direction: self.flow_direction,
            tension: self.tension,
            status: self.status,
        }
    }
}

/// `min / max` of the two energies; two dead faces are in perfect balance.
#[must_use]
pub fn breath_ratio(energy_a: f64, energy_b: f64) -> f64 {
    let hi = energy_a.max(energy_b);
    if hi <= 0.0 {
        return 1.0;
    }
    (energy_a.min(energy_b) / hi).clamp(0.0, 1.0)
}

#[must_use]
pub fn flow_direction(energy_a: f64, energy_b: f64, epsilon: f64) -> FlowDirection {
    let delta = energy_a - energy_b;
    if delta > epsilon {
        FlowDirection::AToB
    } else if -delta > epsilon {
        FlowDirection::BToA
    } else {
        FlowDirection::Balanced
    }
}

/// Tension and status of an edge.
///
/// Two strong faces (both above 0.6) lock into a fixed synergetic tension and
/// two weak ones (both below 0.4) into a fixed depleted one. Otherwise the
/// energy gap raises tension from 0.5, scaled by the element and clamped to
/// `[0, 1]`; a gap above 0.4 reads as flowing.
#[must_use]
pub fn tension(energy_a: f64, energy_b: f64, element: Element) -> (f64, EdgeStatus) {
    if energy_a > 0.6 && energy_b > 0.6 {
        return (0.9, EdgeStatus::Synergetic);
    }
    if energy_a < 0.4 && energy_b < 0.4 {
        return (0.2, EdgeStatus::Depleted);
    }
    let delta = (energy_a - energy_b).abs();
    let tension = ((0.5 + delta / 2.0) * element.tension_multiplier()).clamp(0.0, 1.0);
    let status = if delta > 0.4 {
        EdgeStatus::Flowing
    } else {
        EdgeStatus::Stable
    };
    (tension, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, 1.0)]
    #[case(0.5, 0.5, 1.0)]
    #[case(0.2, 0.8, 0.25)]
    #[case(0.8, 0.2, 0.25)]
    #[case(0.0, 0.6, 0.0)]
    fn breath_ratio_cases(#[case] a: f64, #[case] b: f64, #[case] expected: f64) {
        assert!((breath_ratio(a, b) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.70, 0.50, FlowDirection::AToB)]
    #[case(0.50, 0.70, FlowDirection::BToA)]
    #[case(0.51, 0.50, FlowDirection::Balanced)]
    #[case(0.50, 0.52, FlowDirection::Balanced)]
    fn flow_direction_uses_epsilon(
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: FlowDirection,
    ) {
        assert_eq!(flow_direction(a, b, 0.02), expected);
    }

    #[rstest]
    #[case(0.7, 0.61, Element::Fire, 0.9, EdgeStatus::Synergetic)]
    #[case(0.3, 0.39, Element::Fire, 0.2, EdgeStatus::Depleted)]
    #[case(0.0, 0.0, Element::Air, 0.2, EdgeStatus::Depleted)]
    #[case(0.9, 0.1, Element::Ether, 0.9, EdgeStatus::Flowing)]
    #[case(0.1, 0.9, Element::Fire, 1.0, EdgeStatus::Flowing)]
    #[case(0.7, 0.5, Element::Earth, 0.48, EdgeStatus::Stable)]
    #[case(0.5, 0.5, Element::Air, 0.55, EdgeStatus::Stable)]
    #[case(0.6, 0.9, Element::Water, 0.585, EdgeStatus::Stable)]
    #[case(0.4, 0.2, Element::Ether, 0.6, EdgeStatus::Stable)]
    fn tension_thresholds(
        #[case] a: f64,
        #[case] b: f64,
        #[case] element: Element,
        #[case] expected_tension: f64,
        #[case] expected_status: EdgeStatus,
    ) {
        let (tension, status) = tension(a, b, element);
        assert!((tension - expected_tension).abs() < 1e-12, "tension {tension}");
        assert_eq!(status, expected_status);
    }

    #[test]
    fn recompute_updates_both_metrics() {
        let mut edge = Edge::new(
            "E01",
            FaceId::new(1).unwrap(),
            FaceId::new(2).unwrap(),
            Element::Earth,
        );
        edge.recompute(0.9, 0.3, 0.02);
        assert!((edge.breath_ratio() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(edge.flow_direction(), FlowDirection::AToB);
        assert_eq!(edge.status(), EdgeStatus::Flowing);
        assert!((edge.tension() - 0.64).abs() < 1e-12);
        let snapshot = edge.to_snapshot();
        assert_eq!(snapshot.element, Element::Earth);
        assert_eq!(snapshot.status, EdgeStatus::Flowing);
    }
}
