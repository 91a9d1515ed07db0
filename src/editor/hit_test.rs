//! Resolves canvas points to nodes and arcs. Scans run in index order; the first match wins.

use super::geometry::{Point, distance_to_segment, self_loop_circle};
use super::graph::Graph;

/// The arc at `adjacency[source][slot]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeHit {
	pub source: usize,
	pub slot: usize,
}

/// Lowest-indexed node whose center lies within `radius` of `point`.
pub fn find_node_at(graph: &Graph, point: Point, radius: f64) -> Option<usize> {
	let radius_sq = radius * radius;
	graph
		.nodes()
		.iter()
		.position(|node| node.position.distance_sq(point) <= radius_sq)
}

/// First arc within `threshold` of `point`.
///
/// Straight arcs are scanned row-major over `(source, slot)`. In undirected mode only arcs
/// with `target > source` are tested, since both directions share one drawn segment.
/// Self-loops are tested afterwards against their circle above the node.
pub fn find_edge_near(
	graph: &Graph,
	point: Point,
	threshold: f64,
	node_radius: f64,
) -> Option<EdgeHit> {
	let directed = graph.options().directed;
	let nodes = graph.nodes();

	let straight = graph.arcs().find(|&(source, _, link)| {
		if link.target == source || (!directed && link.target < source) {
			return false;
		}
		let (a, b) = (nodes[source].position, nodes[link.target].position);
		distance_to_segment(point, a, b) <= threshold
	});
	if let Some((source, slot, _)) = straight {
		return Some(EdgeHit { source, slot });
	}

	graph
		.arcs()
		.find(|&(source, _, link)| {
			if link.target != source {
				return false;
			}
			let (center, radius) = self_loop_circle(nodes[source].position, node_radius);
			center.distance_sq(point) <= radius * radius
		})
		.map(|(source, slot, _)| EdgeHit { source, slot })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::editor::config::GraphOptions;

	const R: f64 = 22.0;

	fn line_graph(options: GraphOptions) -> Graph {
		let mut graph = Graph::new(options);
		graph.add_node(Point::new(100.0, 200.0));
		graph.add_node(Point::new(300.0, 200.0));
		graph
	}

	#[test]
	fn overlapping_nodes_resolve_to_the_lowest_index() {
		let mut graph = Graph::new(GraphOptions::default());
		graph.add_node(Point::new(50.0, 50.0));
		graph.add_node(Point::new(52.0, 50.0));
		assert_eq!(find_node_at(&graph, Point::new(51.0, 50.0), R), Some(0));
		assert_eq!(find_node_at(&graph, Point::new(73.0, 50.0), R), Some(1));
		assert_eq!(find_node_at(&graph, Point::new(200.0, 200.0), R), None);
	}

	#[test]
	fn node_radius_boundary_is_inclusive() {
		let mut graph = Graph::new(GraphOptions::default());
		graph.add_node(Point::new(0.0, 0.0));
		assert_eq!(find_node_at(&graph, Point::new(22.0, 0.0), R), Some(0));
		assert_eq!(find_node_at(&graph, Point::new(22.1, 0.0), R), None);
	}

	#[test]
	fn undirected_edge_hits_the_forward_arc_only() {
		let mut graph = line_graph(GraphOptions::new(false, false));
		graph.add_edge(1, 0, 1).unwrap();
		// Row 0 holds the reciprocal arc 0 -> 1, which is the one reported.
		assert_eq!(
			find_edge_near(&graph, Point::new(200.0, 205.0), 8.0, R),
			Some(EdgeHit { source: 0, slot: 0 })
		);
		assert_eq!(find_edge_near(&graph, Point::new(200.0, 210.0), 8.0, R), None);
	}

	#[test]
	fn directed_edges_are_tested_in_both_directions() {
		let mut graph = line_graph(GraphOptions::new(false, true));
		graph.add_edge(1, 0, 1).unwrap();
		assert_eq!(
			find_edge_near(&graph, Point::new(150.0, 198.0), 8.0, R),
			Some(EdgeHit { source: 1, slot: 0 })
		);
	}

	#[test]
	fn straight_edges_win_over_self_loops() {
		let mut graph = Graph::new(GraphOptions::new(false, true));
		graph.add_node(Point::new(100.0, 100.0));
		graph.add_node(Point::new(100.0, 0.0));
		graph.add_self_loop(0, 1).unwrap();
		graph.add_edge(0, 1, 1).unwrap();
		// (100, 67) is the self-loop center and also on the segment.
		assert_eq!(
			find_edge_near(&graph, Point::new(100.0, 67.0), 8.0, R),
			Some(EdgeHit { source: 0, slot: 1 })
		);
	}

	#[test]
	fn self_loop_circle_is_hit() {
		let mut graph = Graph::new(GraphOptions::default());
		graph.add_node(Point::new(100.0, 100.0));
		graph.add_self_loop(0, 1).unwrap();
		assert_eq!(
			find_edge_near(&graph, Point::new(110.0, 60.0), 8.0, R),
			Some(EdgeHit { source: 0, slot: 0 })
		);
		assert_eq!(find_edge_near(&graph, Point::new(140.0, 60.0), 8.0, R), None);
	}

	#[test]
	fn parallel_edges_resolve_to_the_first_slot() {
		let mut graph = line_graph(GraphOptions::new(false, true));
		graph.add_edge(0, 1, 1).unwrap();
		graph.add_edge(0, 1, 2).unwrap();
		assert_eq!(
			find_edge_near(&graph, Point::new(200.0, 200.0), 8.0, R),
			Some(EdgeHit { source: 0, slot: 0 })
		);
	}
}
