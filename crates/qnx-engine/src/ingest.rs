//! Interpretation of loader rows into domain records.
//!
//! Row-level problems (a missing column, an unparsable number, an unknown
//! direction) skip that row with a `warn` diagnostic. Structural problems in
//! the topology (dangling or repeated faces, duplicate ids, wrong counts,
//! degrees or adjacency) abort the load.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

use qnx_core::enums::{Direction, Element, VortexDirection};
use qnx_core::ids::{FACE_COUNT, FaceId};
use qnx_core::rows::{RawRow, edge_columns, kpi_columns, vertex_columns};
use serde::Serialize;
use thiserror::Error;

use crate::edge::Edge;
use crate::error::InitializationError;
use crate::kpi::KpiRecord;
use crate::topology::{EDGE_COUNT, FACE_DEGREE, VERTEX_COUNT};
use crate::vertex::Vertex;

/// What a load kept and what it skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub kpi_rows: usize,
    pub kpis_loaded: usize,
    pub skipped_kpi_rows: usize,
    pub skipped_edge_rows: usize,
    pub skipped_vertex_rows: usize,
    pub empty_faces: Vec<FaceId>,
}

impl LoadReport {
    #[must_use]
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_kpi_rows + self.skipped_edge_rows + self.skipped_vertex_rows
    }
}

#[derive(Debug, Error)]
enum RowError {
    #[error("missing column '{0}'")]
    Missing(&'static str),

    #[error("invalid {column} '{value}'")]
    Invalid { column: &'static str, value: String },

    #[error("duplicate id")]
    Duplicate,

    #[error(transparent)]
    Rejected(#[from] crate::error::EngineError),
}

fn required<'a>(row: &'a RawRow, aliases: &[&str], column: &'static str) -> Result<&'a str, RowError> {
    row.get(aliases).ok_or(RowError::Missing(column))
}

fn number(row: &RawRow, aliases: &[&str], column: &'static str) -> Result<f64, RowError> {
    let cell = required(row, aliases, column)?;
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RowError::Invalid {
            column,
            value: cell.to_string(),
        })
}

fn parsed<T: FromStr>(row: &RawRow, aliases: &[&str], column: &'static str) -> Result<T, RowError> {
    let cell = required(row, aliases, column)?;
    cell.parse().map_err(|_| RowError::Invalid {
        column,
        value: cell.to_string(),
    })
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

fn kpi_from_row(row: &RawRow) -> Result<KpiRecord, RowError> {
    let id = required(row, kpi_columns::ID, "id")?;
    let face_id: FaceId = parsed(row, kpi_columns::FACE_ID, "faceId")?;
    let value = number(row, kpi_columns::VALUE, "value")?;
    let target_min = number(row, kpi_columns::TARGET_MIN, "targetMin")?;
    let target_ideal = number(row, kpi_columns::TARGET_IDEAL, "targetIdeal")?;
    let direction: Direction = parsed(row, kpi_columns::DIRECTION, "direction")?;
    let name = row.get(kpi_columns::NAME).map(str::to_string);

    Ok(KpiRecord::new(
        id,
        name,
        face_id,
        value,
        target_min,
        target_ideal,
        direction,
    )?)
}

/// Build KPI records, skipping malformed and duplicate rows.
pub(crate) fn parse_kpis(rows: &[RawRow], report: &mut LoadReport) -> Vec<KpiRecord> {
    report.kpi_rows = rows.len();
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let result = kpi_from_row(row).and_then(|record| {
            if seen.insert(record.id().to_string()) {
                Ok(record)
            } else {
                Err(RowError::Duplicate)
            }
        });
        match result {
            Ok(record) => records.push(record),
            Err(error) => {
                report.skipped_kpi_rows += 1;
                tracing::warn!(
                    %error,
                    row = index,
                    kpi_id = row.get(kpi_columns::ID).unwrap_or("<none>"),
                    "skipping KPI row"
                );
            }
        }
    }

    report.kpis_loaded = records.len();
    records
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

/// Resolve a face reference. Unparsable references are fatal, unlike other
/// row problems: a topology row pointing nowhere cannot be skipped safely.
fn face_ref(
    row: &RawRow,
    aliases: &[&str],
    column: &'static str,
    entity_type: &'static str,
    id: &str,
) -> Result<Result<FaceId, RowError>, InitializationError> {
    let Some(cell) = row.get(aliases) else {
        return Ok(Err(RowError::Missing(column)));
    };
    cell.parse::<FaceId>()
        .map(Ok)
        .map_err(|_| InitializationError::UnknownFace {
            entity_type,
            id: id.to_string(),
            face: cell.to_string(),
        })
}

fn check_distinct(
    faces: &[FaceId],
    entity_type: &'static str,
    id: &str,
) -> Result<(), InitializationError> {
    let mut seen = BTreeSet::new();
    for face in faces {
        if !seen.insert(*face) {
            return Err(InitializationError::RepeatedFace {
                entity_type,
                id: id.to_string(),
                face: *face,
            });
        }
    }
    Ok(())
}

fn edge_from_row(row: &RawRow) -> Result<Result<Edge, RowError>, InitializationError> {
    let id = match required(row, edge_columns::ID, "edgeId") {
        Ok(id) => id,
        Err(error) => return Ok(Err(error)),
    };
    let face_a = match face_ref(row, edge_columns::FACE_A, "faceAId", "edge", id)? {
        Ok(face) => face,
        Err(error) => return Ok(Err(error)),
    };
    let face_b = match face_ref(row, edge_columns::FACE_B, "faceBId", "edge", id)? {
        Ok(face) => face,
        Err(error) => return Ok(Err(error)),
    };
    check_distinct(&[face_a, face_b], "edge", id)?;

    Ok(parsed::<Element>(row, edge_columns::ELEMENT, "element")
        .map(|element| Edge::new(id, face_a, face_b, element)))
}

fn vertex_from_row(
    row: &RawRow,
    position: usize,
) -> Result<Result<Vertex, RowError>, InitializationError> {
    let id = match required(row, vertex_columns::ID, "vertexId") {
        Ok(id) => id,
        Err(error) => return Ok(Err(error)),
    };

    let columns = [
        (vertex_columns::FACE_1, "faceId1"),
        (vertex_columns::FACE_2, "faceId2"),
        (vertex_columns::FACE_3, "faceId3"),
    ];
    let mut faces = Vec::with_capacity(3);
    for (aliases, column) in columns {
        match face_ref(row, aliases, column, "vertex", id)? {
            Ok(face) => faces.push(face),
            Err(error) => return Ok(Err(error)),
        }
    }
    check_distinct(&faces, "vertex", id)?;

    let vortex = if row.get(vertex_columns::VORTEX_DIRECTION).is_some() {
        match parsed::<VortexDirection>(row, vertex_columns::VORTEX_DIRECTION, "vortexDirection") {
            Ok(vortex) => vortex,
            Err(error) => return Ok(Err(error)),
        }
    } else if position % 2 == 0 {
        VortexDirection::Clockwise
    } else {
        VortexDirection::CounterClockwise
    };

    Ok(Ok(Vertex::new(id, [faces[0], faces[1], faces[2]], vortex)))
}

pub(crate) fn parse_edges(
    rows: &[RawRow],
    report: &mut LoadReport,
) -> Result<Vec<Edge>, InitializationError> {
    let mut ids = HashSet::new();
    let mut edges = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match edge_from_row(row)? {
            Ok(edge) => {
                if !ids.insert(edge.id().to_string()) {
                    return Err(InitializationError::DuplicateId {
                        entity_type: "edge",
                        id: edge.id().to_string(),
                    });
                }
                edges.push(edge);
            }
            Err(error) => {
                report.skipped_edge_rows += 1;
                tracing::warn!(%error, row = index, "skipping edge row");
            }
        }
    }
    edges.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(edges)
}

pub(crate) fn parse_vertices(
    rows: &[RawRow],
    report: &mut LoadReport,
) -> Result<Vec<Vertex>, InitializationError> {
    let mut ids = HashSet::new();
    let mut vertices = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match vertex_from_row(row, index)? {
            Ok(vertex) => {
                if !ids.insert(vertex.id().to_string()) {
                    return Err(InitializationError::DuplicateId {
                        entity_type: "vertex",
                        id: vertex.id().to_string(),
                    });
                }
                vertices.push(vertex);
            }
            Err(error) => {
                report.skipped_vertex_rows += 1;
                tracing::warn!(%error, row = index, "skipping vertex row");
            }
        }
    }
    vertices.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(vertices)
}

/// Enforce the dodecahedron's counts, per-face degrees and adjacency.
///
/// Degrees alone admit rewirings that keep every face at five edges, so each
/// vertex's face pairs must also be edges, and each edge must end at exactly
/// two vertices.
pub(crate) fn validate_topology(
    edges: &[Edge],
    vertices: &[Vertex],
) -> Result<(), InitializationError> {
    if edges.len() != EDGE_COUNT {
        return Err(InitializationError::TopologyCount {
            entity_type: "edge",
            expected: EDGE_COUNT,
            actual: edges.len(),
        });
    }
    if vertices.len() != VERTEX_COUNT {
        return Err(InitializationError::TopologyCount {
            entity_type: "vertex",
            expected: VERTEX_COUNT,
            actual: vertices.len(),
        });
    }

    let mut ends: BTreeMap<(FaceId, FaceId), (&str, usize)> = BTreeMap::new();
    for edge in edges {
        let (a, b) = edge.faces();
        if let Some((other, _)) = ends.insert(face_pair(a, b), (edge.id(), 0)) {
            return Err(InitializationError::ParallelEdge {
                id: edge.id().to_string(),
                other: other.to_string(),
            });
        }
    }

    let mut edge_degree = [0_usize; FACE_COUNT];
    for edge in edges {
        let (a, b) = edge.faces();
        edge_degree[a.index()] += 1;
        edge_degree[b.index()] += 1;
    }
    let mut vertex_degree = [0_usize; FACE_COUNT];
    for vertex in vertices {
        for face in vertex.faces() {
            vertex_degree[face.index()] += 1;
        }
    }

    for face in FaceId::all() {
        for (entity_type, degree) in [
            ("edge", edge_degree[face.index()]),
            ("vertex", vertex_degree[face.index()]),
        ] {
            if degree != FACE_DEGREE {
                return Err(InitializationError::FaceDegree {
                    face,
                    entity_type,
                    expected: FACE_DEGREE,
                    actual: degree,
                });
            }
        }
    }

    for vertex in vertices {
        let [a, b, c] = vertex.faces();
        for (face_a, face_b) in [(a, b), (a, c), (b, c)] {
            let Some((_, count)) = ends.get_mut(&face_pair(face_a, face_b)) else {
                return Err(InitializationError::UnjoinedFaces {
                    vertex: vertex.id().to_string(),
                    face_a,
                    face_b,
                });
            };
            *count += 1;
        }
    }
    if let Some((id, actual)) = ends.into_values().find(|&(_, count)| count != 2) {
        return Err(InitializationError::EdgeEnds { id: id.to_string(), actual });
    }
    Ok(())
}

fn face_pair(a: FaceId, b: FaceId) -> (FaceId, FaceId) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::builtin_topology_rows;

    fn kpi_row(id: &str, face: &str) -> RawRow {
        RawRow::new()
            .with("id", id)
            .with("faceId", face)
            .with("value", 50)
            .with("targetMin", 0)
            .with("targetIdeal", 100)
            .with("direction", "increasing")
    }

    #[test]
    fn kpi_rows_accept_aliases() {
        let row = RawRow::new()
            .with("KPI_ID", "nps")
            .with("KPI_Name", "Net promoter score")
            .with("Face_ID", "F5")
            .with("Value", "30")
            .with("Target_Min", "-100")
            .with("Target_Ideal", "100")
            .with("Direction", "↑");
        let mut report = LoadReport::default();
        let records = parse_kpis(&[row], &mut report);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("Net promoter score"));
        assert_eq!(records[0].face_id().get(), 5);
        assert!((records[0].normalized_score() - 0.65).abs() < 1e-12);
        assert_eq!(report.skipped_kpi_rows, 0);
    }

    #[test]
    fn malformed_kpi_rows_are_skipped_and_counted() {
        let rows = vec![
            kpi_row("ok", "1"),
            kpi_row("bad-face", "13"),
            kpi_row("bad-number", "2").with("value", "lots"),
            kpi_row("flat", "3").with("targetIdeal", "0"),
            RawRow::new().with("faceId", "4"),
            kpi_row("ok", "5"),
            kpi_row("bad-direction", "6").with("direction", "Band"),
        ];
        let mut report = LoadReport::default();
        let records = parse_kpis(&rows, &mut report);

        assert_eq!(records.len(), 1);
        assert_eq!(report.kpi_rows, 7);
        assert_eq!(report.kpis_loaded, 1);
        assert_eq!(report.skipped_kpi_rows, 6);
    }

    #[test]
    fn decreasing_row_with_ideal_above_min_is_skipped() {
        let rows = vec![
            kpi_row("churn", "4")
                .with("targetMin", 30)
                .with("targetIdeal", 5)
                .with("direction", "decreasing"),
            kpi_row("backwards", "4")
                .with("targetMin", 5)
                .with("targetIdeal", 30)
                .with("direction", "decreasing"),
        ];
        let mut report = LoadReport::default();
        let records = parse_kpis(&rows, &mut report);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "churn");
        assert_eq!(report.skipped_kpi_rows, 1);
    }

    #[test]
    fn builtin_rows_pass_validation() {
        let rows = builtin_topology_rows();
        let mut report = LoadReport::default();
        let edges = parse_edges(&rows.edges, &mut report).unwrap();
        let vertices = parse_vertices(&rows.vertices, &mut report).unwrap();
        validate_topology(&edges, &vertices).unwrap();
        assert_eq!(report.skipped_rows(), 0);
    }

    #[test]
    fn dangling_face_reference_is_fatal() {
        let row = RawRow::new()
            .with("edgeId", "E99")
            .with("faceAId", "1")
            .with("faceBId", "14")
            .with("element", "fire");
        let err = parse_edges(&[row], &mut LoadReport::default()).unwrap_err();
        assert!(matches!(err, InitializationError::UnknownFace { ref face, .. } if face == "14"));
    }

    #[test]
    fn repeated_face_is_fatal() {
        let row = RawRow::new()
            .with("vertexId", "V99")
            .with("faceId1", "2")
            .with("faceId2", "2")
            .with("faceId3", "3");
        let err = parse_vertices(&[row], &mut LoadReport::default()).unwrap_err();
        assert!(matches!(err, InitializationError::RepeatedFace { .. }));
    }

    #[test]
    fn duplicate_edge_id_is_fatal() {
        let mut rows = builtin_topology_rows().edges;
        rows[1].insert("edgeId", "E01");
        let err = parse_edges(&rows, &mut LoadReport::default()).unwrap_err();
        assert!(matches!(err, InitializationError::DuplicateId { entity_type: "edge", .. }));
    }

    #[test]
    fn missing_vortex_alternates_by_position() {
        let rows: Vec<RawRow> = (0..2)
            .map(|i| {
                RawRow::new()
                    .with("vertexId", format!("V{i}"))
                    .with("faceId1", "1")
                    .with("faceId2", "2")
                    .with("faceId3", "3")
            })
            .collect();
        let vertices = parse_vertices(&rows, &mut LoadReport::default()).unwrap();
        assert_eq!(vertices[0].vortex_direction(), VortexDirection::Clockwise);
        assert_eq!(vertices[1].vortex_direction(), VortexDirection::CounterClockwise);
    }

    #[test]
    fn skipped_edge_row_breaks_count() {
        let mut rows = builtin_topology_rows();
        rows.edges[4].insert("element", "plasma");
        let mut report = LoadReport::default();
        let edges = parse_edges(&rows.edges, &mut report).unwrap();
        let vertices = parse_vertices(&rows.vertices, &mut report).unwrap();
        assert_eq!(report.skipped_edge_rows, 1);

        let err = validate_topology(&edges, &vertices).unwrap_err();
        assert!(matches!(
            err,
            InitializationError::TopologyCount { entity_type: "edge", expected: 30, actual: 29 }
        ));
    }

    #[test]
    fn rewired_edge_breaks_face_degree() {
        let mut rows = builtin_topology_rows();
        // E01 joins 1-2; move it to 1-7 so face 1 keeps degree 5 but 2 and 7 drift.
        rows.edges[0].insert("faceBId", "7");
        let mut report = LoadReport::default();
        let edges = parse_edges(&rows.edges, &mut report).unwrap();
        let vertices = parse_vertices(&rows.vertices, &mut report).unwrap();

        let err = validate_topology(&edges, &vertices).unwrap_err();
        assert!(matches!(
            err,
            InitializationError::FaceDegree { entity_type: "edge", actual: 4, .. }
        ));
    }

    #[test]
    fn degree_preserving_rewiring_breaks_adjacency() {
        let mut rows = builtin_topology_rows();
        // E01 (1-2) becomes 1-8 and E21 (7-8) becomes 2-7: every face keeps
        // five edges, but neither 1-2 nor 7-8 is joined any more.
        rows.edges[0].insert("faceBId", "8");
        rows.edges[20].insert("faceAId", "2");
        rows.edges[20].insert("faceBId", "7");
        let mut report = LoadReport::default();
        let edges = parse_edges(&rows.edges, &mut report).unwrap();
        let vertices = parse_vertices(&rows.vertices, &mut report).unwrap();

        let err = validate_topology(&edges, &vertices).unwrap_err();
        let InitializationError::UnjoinedFaces { face_a, face_b, .. } = err else {
            panic!("expected UnjoinedFaces, got {err:?}");
        };
        assert!(matches!((face_a.get(), face_b.get()), (1, 2) | (7, 8)));
    }

    #[test]
    fn parallel_edges_are_fatal() {
        let mut rows = builtin_topology_rows();
        rows.edges[0].insert("faceAId", "7");
        rows.edges[0].insert("faceBId", "8");
        let mut report = LoadReport::default();
        let edges = parse_edges(&rows.edges, &mut report).unwrap();
        let vertices = parse_vertices(&rows.vertices, &mut report).unwrap();

        let err = validate_topology(&edges, &vertices).unwrap_err();
        assert!(matches!(
            err,
            InitializationError::ParallelEdge { ref id, ref other } if id == "E21" && other == "E01"
        ));
    }
}
