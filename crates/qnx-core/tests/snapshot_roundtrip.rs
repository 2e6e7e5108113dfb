//! Serde roundtrip and JsonSchema validation tests for snapshot types.

use qnx_core::enums::*;
use qnx_core::ids::FaceId;
use qnx_core::snapshot::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn face(n: u8) -> FaceId {
    FaceId::new(n).unwrap()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_kpi() -> KpiSnapshot {
    KpiSnapshot {
        id: "cash-runway".into(),
        name: Some("Cash runway (months)".into()),
        face_id: face(1),
        value: 9.0,
        target_min: 3.0,
        target_ideal: 18.0,
        direction: Direction::Increasing,
        normalized_score: 0.4,
    }
}

fn sample_face() -> FaceSnapshot {
    FaceSnapshot {
        id: face(1),
        name: "Financial Capital".into(),
        energy: 0.4,
        health_status: HealthStatus::Stressed,
        is_empty: false,
        critical_kpi: Some("cash-runway".into()),
        kpis: vec![sample_kpi()],
    }
}

fn sample_axis() -> AxisSnapshot {
    AxisSnapshot {
        name: "Resource Flow".into(),
        reception_face: face(1),
        projection_face: face(11),
        reception_energy: 0.4,
        projection_energy: 0.5,
        ratio: 0.8,
        tendency: BreathTendency::Balanced,
        severity: BreathSeverity::None,
        tension: 0.2,
    }
}

roundtrip_and_validate!(kpi_snapshot_roundtrip, KpiSnapshot, sample_kpi());

roundtrip_and_validate!(face_snapshot_roundtrip, FaceSnapshot, sample_face());

roundtrip_and_validate!(
    empty_face_snapshot_roundtrip,
    FaceSnapshot,
    FaceSnapshot {
        id: face(7),
        name: "Brand & Reputation".into(),
        energy: 0.0,
        health_status: HealthStatus::Critical,
        is_empty: true,
        critical_kpi: None,
        kpis: vec![],
    }
);

roundtrip_and_validate!(
    edge_snapshot_roundtrip,
    EdgeSnapshot,
    EdgeSnapshot {
        id: "E01".into(),
        face_a_id: face(1),
        face_b_id: face(2),
        element: Element::Earth,
        breath_ratio: 0.75,
        flow_direction: FlowDirection::BToA,
        tension: 0.58,
        status: EdgeStatus::Stable,
    }
);

roundtrip_and_validate!(
    vertex_snapshot_roundtrip,
    VertexSnapshot,
    VertexSnapshot {
        id: "V01".into(),
        face_ids: [face(1), face(2), face(3)],
        vortex_direction: VortexDirection::Clockwise,
        coherence: 0.72,
        is_leverage_point: true,
        momentum: 0.44,
        vortex_energy: 0.71,
        status: VortexStatus::ActiveFlow,
    }
);

roundtrip_and_validate!(axis_snapshot_roundtrip, AxisSnapshot, sample_axis());

fn sample_shadow() -> ShadowSummary {
    ShadowSummary {
        patterns: vec![ShadowPatternSnapshot {
            name: "Burnout Engine".into(),
            severity: ShadowSeverity::High,
            penalty: 0.4,
            affected_faces: vec![face(8)],
            shadow_faces: vec![face(3)],
            gap: 0.55,
        }],
        penalties: vec![FacePenalty {
            face_id: face(8),
            penalty: 0.4,
        }],
        integrity_score: 0.8,
        integrity_status: IntegrityStatus::Good,
    }
}

fn clear_shadow() -> ShadowSummary {
    ShadowSummary {
        patterns: vec![],
        penalties: vec![],
        integrity_score: 1.0,
        integrity_status: IntegrityStatus::Excellent,
    }
}

roundtrip_and_validate!(shadow_summary_roundtrip, ShadowSummary, sample_shadow());

roundtrip_and_validate!(
    update_outcome_roundtrip,
    UpdateOutcome,
    UpdateOutcome {
        kpi_id: "cash-runway".into(),
        face_id: face(1),
        previous_value: 9.0,
        value: 18.0,
        previous_score: 0.4,
        normalized_score: 1.0,
        touched_edges: vec!["E01".into(), "E02".into()],
        touched_vertices: vec!["V01".into()],
        previous_coherence: 0.41,
        global_coherence: 0.47,
    }
);

roundtrip_and_validate!(
    action_plan_roundtrip,
    ActionPlan,
    ActionPlan {
        kpi_id: "cash-runway".into(),
        kpi_name: None,
        face_id: face(1),
        current_value: 9.0,
        current_score: 0.4,
        target_value: 18.0,
        projected_coherence: 0.47,
        expected_gain: 0.06,
    }
);

roundtrip_and_validate!(
    engine_snapshot_roundtrip,
    EngineSnapshot,
    EngineSnapshot {
        global_coherence: 0.41,
        coherence_status: CoherenceStatus::Concerning,
        faces: vec![sample_face()],
        edges: vec![],
        vertices: vec![],
        breath: BreathSummary {
            breath_health: 0.8,
            balanced_axes: 1,
            over_exhaling: 0,
            over_inhaling: 0,
            critical_axes: 0,
            dominant_tendency: BreathTendency::Mixed,
            axes: vec![sample_axis()],
        },
        shadow: sample_shadow(),
        statistics: Statistics {
            total_kpis: 1,
            healthy_faces: 0,
            empty_faces: 11,
            leverage_points: 0,
            balanced_axes: 1,
        },
    }
);

#[test]
fn snapshot_fields_serialize_camel_case() {
    let edge = EdgeSnapshot {
        id: "E08".into(),
        face_a_id: face(2),
        face_b_id: face(10),
        element: Element::Air,
        breath_ratio: 1.0,
        flow_direction: FlowDirection::Balanced,
        tension: 0.9,
        status: EdgeStatus::Synergetic,
    };
    let json = serde_json::to_value(&edge).unwrap();
    assert_eq!(json["faceAId"], 2);
    assert_eq!(json["faceBId"], 10);
    assert_eq!(json["breathRatio"], 1.0);
    assert_eq!(json["flowDirection"], "balanced");
    assert_eq!(json["status"], "synergetic");
}

#[test]
fn snapshot_rejects_out_of_range_face() {
    let json = serde_json::json!({
        "id": "E01",
        "faceAId": 0,
        "faceBId": 2,
        "element": "earth",
        "breathRatio": 1.0,
        "flowDirection": "balanced",
        "tension": 0.55,
        "status": "stable",
    });
    assert!(serde_json::from_value::<EdgeSnapshot>(json).is_err());
}

#[test]
fn lookup_helpers_find_entities() {
    let snapshot = EngineSnapshot {
        global_coherence: 0.0,
        coherence_status: CoherenceStatus::Crisis,
        faces: vec![sample_face()],
        edges: vec![],
        vertices: vec![],
        breath: BreathSummary {
            breath_health: 0.0,
            balanced_axes: 0,
            over_exhaling: 0,
            over_inhaling: 0,
            critical_axes: 0,
            dominant_tendency: BreathTendency::Mixed,
            axes: vec![],
        },
        shadow: clear_shadow(),
        statistics: Statistics {
            total_kpis: 1,
            healthy_faces: 0,
            empty_faces: 11,
            leverage_points: 0,
            balanced_axes: 0,
        },
    };
    assert_eq!(snapshot.face(face(1)).map(|f| f.energy), Some(0.4));
    assert!(snapshot.face(face(2)).is_none());
    assert_eq!(snapshot.kpi("cash-runway").map(|k| k.value), Some(9.0));
    assert!(snapshot.edge("E01").is_none());
    assert!(snapshot.vertex("V01").is_none());
}
