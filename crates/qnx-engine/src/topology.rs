//! The fixed dodecahedral topology as declarative data.
//!
//! Face numbering places each axis pair on opposite faces: 1↔11, 2↔7,
//! 3↔8, 4↔9, 5↔10, 6↔12. Every face borders five edges carrying all five
//! elements once, and antipodal vertices spin in opposite directions.

use qnx_core::enums::{Element, VortexDirection};
use qnx_core::rows::{RawRow, TopologyRows, edge_columns, vertex_columns};

use Element::{Air, Earth, Ether, Fire, Water};
use VortexDirection::{Clockwise as CW, CounterClockwise as CCW};

pub const EDGE_COUNT: usize = 30;
pub const VERTEX_COUNT: usize = 20;

/// Number of edges (and of vertices) around each face.
pub const FACE_DEGREE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub id: &'static str,
    pub faces: (u8, u8),
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexSpec {
    pub id: &'static str,
    pub faces: [u8; 3],
    pub vortex: VortexDirection,
}

#[derive(Debug)]
pub struct TopologyTable {
    pub edges: [EdgeSpec; EDGE_COUNT],
    pub vertices: [VertexSpec; VERTEX_COUNT],
}

const fn e(id: &'static str, a: u8, b: u8, element: Element) -> EdgeSpec {
    EdgeSpec {
        id,
        faces: (a, b),
        element,
    }
}

const fn v(id: &'static str, faces: [u8; 3], vortex: VortexDirection) -> VertexSpec {
    VertexSpec { id, faces, vortex }
}

pub static DODECAHEDRON: TopologyTable = TopologyTable {
    edges: [
        e("E01", 1, 2, Earth),
        e("E02", 1, 3, Water),
        e("E03", 1, 4, Fire),
        e("E04", 1, 5, Air),
        e("E05", 1, 6, Ether),
        e("E06", 2, 3, Fire),
        e("E07", 2, 4, Water),
        e("E08", 2, 10, Air),
        e("E09", 2, 12, Ether),
        e("E10", 3, 5, Earth),
        e("E11", 3, 9, Ether),
        e("E12", 3, 12, Air),
        e("E13", 4, 6, Earth),
        e("E14", 4, 8, Air),
        e("E15", 4, 10, Ether),
        e("E16", 5, 6, Water),
        e("E17", 5, 7, Ether),
        e("E18", 5, 9, Fire),
        e("E19", 6, 7, Air),
        e("E20", 6, 8, Fire),
        e("E21", 7, 8, Earth),
        e("E22", 7, 9, Water),
        e("E23", 7, 11, Fire),
        e("E24", 8, 10, Water),
        e("E25", 8, 11, Ether),
        e("E26", 9, 11, Air),
        e("E27", 9, 12, Earth),
        e("E28", 10, 11, Earth),
        e("E29", 10, 12, Fire),
        e("E30", 11, 12, Water),
    ],
    vertices: [
        v("V01", [1, 2, 3], CW),
        v("V02", [1, 2, 4], CW),
        v("V03", [1, 3, 5], CW),
        v("V04", [1, 4, 6], CW),
        v("V05", [1, 5, 6], CW),
        v("V06", [2, 3, 12], CW),
        v("V07", [2, 4, 10], CW),
        v("V08", [2, 10, 12], CW),
        v("V09", [3, 5, 9], CW),
        v("V10", [3, 9, 12], CW),
        v("V11", [4, 6, 8], CCW),
        v("V12", [4, 8, 10], CCW),
        v("V13", [5, 6, 7], CCW),
        v("V14", [5, 7, 9], CCW),
        v("V15", [6, 7, 8], CCW),
        v("V16", [7, 8, 11], CCW),
        v("V17", [7, 9, 11], CCW),
        v("V18", [8, 10, 11], CCW),
        v("V19", [9, 11, 12], CCW),
        v("V20", [10, 11, 12], CCW),
    ],
};

/// Render [`DODECAHEDRON`] as loader rows, for in-memory loaders and for
/// datasets that only ship KPIs.
#[must_use]
pub fn builtin_topology_rows() -> TopologyRows {
    let edges = DODECAHEDRON
        .edges
        .iter()
        .map(|spec| {
            RawRow::new()
                .with(edge_columns::ID[0], spec.id)
                .with(edge_columns::FACE_A[0], spec.faces.0)
                .with(edge_columns::FACE_B[0], spec.faces.1)
                .with(edge_columns::ELEMENT[0], spec.element)
        })
        .collect();

    let vertices = DODECAHEDRON
        .vertices
        .iter()
        .map(|spec| {
            RawRow::new()
                .with(vertex_columns::ID[0], spec.id)
                .with(vertex_columns::FACE_1[0], spec.faces[0])
                .with(vertex_columns::FACE_2[0], spec.faces[1])
                .with(vertex_columns::FACE_3[0], spec.faces[2])
                .with(vertex_columns::VORTEX_DIRECTION[0], spec.vortex)
        })
        .collect();

    TopologyRows { edges, vertices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn every_face_has_five_edges_with_all_elements() {
        for face in 1..=12_u8 {
            let elements: HashSet<Element> = DODECAHEDRON
                .edges
                .iter()
                .filter(|spec| spec.faces.0 == face || spec.faces.1 == face)
                .map(|spec| spec.element)
                .collect();
            assert_eq!(elements.len(), FACE_DEGREE, "face {face}");
        }
    }

    #[test]
    fn every_face_has_five_vertices() {
        for face in 1..=12_u8 {
            let count = DODECAHEDRON
                .vertices
                .iter()
                .filter(|spec| spec.faces.contains(&face))
                .count();
            assert_eq!(count, FACE_DEGREE, "face {face}");
        }
    }

    #[test]
    fn vertex_faces_are_pairwise_adjacent() {
        let adjacent: HashSet<(u8, u8)> = DODECAHEDRON
            .edges
            .iter()
            .map(|spec| spec.faces)
            .collect();
        for spec in &DODECAHEDRON.vertices {
            let [a, b, c] = spec.faces;
            for pair in [(a, b), (a, c), (b, c)] {
                assert!(adjacent.contains(&pair), "{} lacks edge {pair:?}", spec.id);
            }
        }
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let edge_ids: BTreeSet<&str> = DODECAHEDRON.edges.iter().map(|s| s.id).collect();
        let vertex_ids: BTreeSet<&str> = DODECAHEDRON.vertices.iter().map(|s| s.id).collect();
        assert_eq!(edge_ids.len(), EDGE_COUNT);
        assert_eq!(vertex_ids.len(), VERTEX_COUNT);
        assert!(DODECAHEDRON.edges.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn vortex_directions_split_evenly() {
        let clockwise = DODECAHEDRON
            .vertices
            .iter()
            .filter(|spec| spec.vortex == VortexDirection::Clockwise)
            .count();
        assert_eq!(clockwise, VERTEX_COUNT / 2);
    }

    #[test]
    fn builtin_rows_carry_every_column() {
        let rows = builtin_topology_rows();
        assert_eq!(rows.edges.len(), EDGE_COUNT);
        assert_eq!(rows.vertices.len(), VERTEX_COUNT);
        assert_eq!(rows.edges[7].get(edge_columns::FACE_B), Some("10"));
        assert_eq!(rows.edges[7].get(edge_columns::ELEMENT), Some("air"));
        assert_eq!(
            rows.vertices[19].get(vertex_columns::VORTEX_DIRECTION),
            Some("counter_clockwise")
        );
    }
}
