//! Graph-level checks of the built-in dodecahedron using rustworkx-core.
//!
//! Faces are nodes, edges join adjacent faces. The face-adjacency graph of a
//! dodecahedron is the icosahedral graph: connected, 5-regular, diameter 3,
//! with every vertex of the solid appearing as a triangle.

use std::collections::HashMap;
use std::convert::Infallible;

use qnx_core::enums::Element;
use qnx_core::ids::FaceId;
use qnx_engine::DODECAHEDRON;
use qnx_engine::axis::{AXES, opposite};
use rustworkx_core::connectivity::connected_components;
use rustworkx_core::dictmap::DictMap;
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};
use rustworkx_core::shortest_path::dijkstra;

struct FaceGraph {
    graph: UnGraph<u8, Element>,
    index: HashMap<u8, NodeIndex>,
}

fn face_graph() -> FaceGraph {
    let mut graph = UnGraph::new_undirected();
    let index: HashMap<u8, NodeIndex> = (1..=12).map(|face| (face, graph.add_node(face))).collect();
    for spec in &DODECAHEDRON.edges {
        graph.add_edge(index[&spec.faces.0], index[&spec.faces.1], spec.element);
    }
    FaceGraph { graph, index }
}

fn hop_distances(graph: &FaceGraph, from: u8) -> DictMap<NodeIndex, usize> {
    dijkstra(
        &graph.graph,
        graph.index[&from],
        None,
        |_| Ok::<usize, Infallible>(1),
        None,
    )
    .unwrap()
}

#[test]
fn face_graph_is_connected_and_five_regular() {
    let graph = face_graph();
    assert_eq!(graph.graph.node_count(), 12);
    assert_eq!(graph.graph.edge_count(), 30);
    assert_eq!(connected_components(&graph.graph).len(), 1);
    for node in graph.graph.node_indices() {
        assert_eq!(graph.graph.neighbors(node).count(), 5, "face {}", graph.graph[node]);
    }
}

#[test]
fn axis_pairs_are_antipodal() {
    let graph = face_graph();
    for axis in AXES {
        let distances = hop_distances(&graph, axis.reception);
        let far = distances[&graph.index[&axis.projection]];
        assert_eq!(far, 3, "{} should span the solid", axis.name);

        let max = distances.values().copied().max().unwrap();
        assert_eq!(max, 3);
        let antipodes = distances.values().filter(|d| **d == 3).count();
        assert_eq!(antipodes, 1, "exactly one face lies opposite face {}", axis.reception);
    }
}

#[test]
fn opposite_matches_graph_antipode() {
    let graph = face_graph();
    for face in FaceId::all() {
        let distances = hop_distances(&graph, face.get());
        let antipode = opposite(face).get();
        assert_eq!(distances[&graph.index[&antipode]], 3);
    }
}

#[test]
fn every_vertex_is_a_triangle_of_faces() {
    let graph = face_graph();
    for spec in &DODECAHEDRON.vertices {
        let [a, b, c] = spec.faces.map(|face| graph.index[&face]);
        for (x, y) in [(a, b), (a, c), (b, c)] {
            assert!(
                graph.graph.find_edge(x, y).is_some(),
                "{} is not a triangle",
                spec.id
            );
        }
    }
}

#[test]
fn antipodal_vertices_spin_oppositely() {
    for spec in &DODECAHEDRON.vertices {
        let mirrored = spec.faces.map(|face| opposite(FaceId::new(face).unwrap()).get());
        let partner = DODECAHEDRON
            .vertices
            .iter()
            .find(|other| mirrored.iter().all(|face| other.faces.contains(face)))
            .unwrap_or_else(|| panic!("{} has no antipodal vertex", spec.id));
        assert_eq!(partner.vortex, spec.vortex.reversed(), "{} vs {}", spec.id, partner.id);
    }
}
