//! The in-memory graph model: nodes addressed by index plus a lockstep adjacency list.
//!
//! Node identity is the node's position in [`GraphState::nodes`]. Removing a node shifts every
//! later node down by one and rewrites all arc targets to match.

use super::config::GraphOptions;
use super::error::{EditError, EditResult};
use super::geometry::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub position: Point,
	/// Display label. Defaults to the node count at creation time; not unique.
	pub label: String,
	/// Set while a traversal animation runs.
	pub visited: bool,
}

/// One directed arc in its source node's adjacency row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub target: usize,
	/// Always stored; only meaningful when the graph is weighted.
	pub weight: u32,
}

/// Everything undo/redo captures. `adjacency.len() == nodes.len()` at all times.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphState {
	pub nodes: Vec<Node>,
	pub adjacency: Vec<Vec<Link>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
	state: GraphState,
	options: GraphOptions,
}

impl Graph {
	pub fn new(options: GraphOptions) -> Self {
		Self {
			state: GraphState::default(),
			options,
		}
	}

	pub fn options(&self) -> GraphOptions {
		self.options
	}

	pub fn node_count(&self) -> usize {
		self.state.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.state.nodes.is_empty()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.state.nodes
	}

	pub fn node(&self, index: usize) -> Option<&Node> {
		self.state.nodes.get(index)
	}

	pub fn adjacency(&self) -> &[Vec<Link>] {
		&self.state.adjacency
	}

	/// Arcs leaving `index`, empty for an unknown node.
	pub fn links(&self, index: usize) -> &[Link] {
		self.state.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Iterates every arc as `(source, slot, link)` in row-major order.
	pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, Link)> + '_ {
		self.state
			.adjacency
			.iter()
			.enumerate()
			.flat_map(|(source, row)| {
				row.iter()
					.enumerate()
					.map(move |(slot, link)| (source, slot, *link))
			})
	}

	pub fn has_self_loop(&self, index: usize) -> bool {
		self.links(index).iter().any(|l| l.target == index)
	}

	pub fn self_loop_weight(&self, index: usize) -> Option<u32> {
		self.links(index)
			.iter()
			.find(|l| l.target == index)
			.map(|l| l.weight)
	}

	/// Appends a node labelled with the current node count and returns its index.
	pub fn add_node(&mut self, position: Point) -> usize {
		let index = self.state.nodes.len();
		self.state.nodes.push(Node {
			position,
			label: index.to_string(),
			visited: false,
		});
		self.state.adjacency.push(Vec::new());
		index
	}

	/// Adds `u -> v`, plus `v -> u` when undirected. Parallel edges are allowed.
	///
	/// `u == v` is treated as [`Graph::add_self_loop`], so a loop is never stored twice.
	pub fn add_edge(&mut self, u: usize, v: usize, weight: u32) -> EditResult<()> {
		if u == v {
			return self.add_self_loop(u, weight);
		}
		self.check_node(u)?;
		self.check_node(v)?;
		self.state.adjacency[u].push(Link { target: v, weight });
		if !self.options.directed {
			self.state.adjacency[v].push(Link { target: u, weight });
		}
		Ok(())
	}

	/// Adds a self-loop at `u`. A node carries at most one.
	pub fn add_self_loop(&mut self, u: usize, weight: u32) -> EditResult<()> {
		self.check_node(u)?;
		if self.has_self_loop(u) {
			return Err(EditError::SelfLoopExists(u));
		}
		self.state.adjacency[u].push(Link { target: u, weight });
		Ok(())
	}

	/// Removes node `index`, drops every arc into it and renumbers later targets.
	pub fn remove_node(&mut self, index: usize) -> EditResult<Node> {
		self.check_node(index)?;
		let node = self.state.nodes.remove(index);
		self.state.adjacency.remove(index);
		for row in &mut self.state.adjacency {
			row.retain(|l| l.target != index);
			for link in row.iter_mut().filter(|l| l.target > index) {
				link.target -= 1;
			}
		}
		Ok(node)
	}

	/// Removes exactly one arc. The reciprocal arc of an undirected edge stays.
	pub fn remove_edge_at(&mut self, u: usize, slot: usize) -> EditResult<Link> {
		self.check_node(u)?;
		let len = self.state.adjacency[u].len();
		if slot >= len {
			return Err(EditError::SlotOutOfRange { node: u, slot, len });
		}
		Ok(self.state.adjacency[u].remove(slot))
	}

	pub fn clear(&mut self) {
		self.state.nodes.clear();
		self.state.adjacency.clear();
	}

	pub fn reset_visited_flags(&mut self) {
		for node in &mut self.state.nodes {
			node.visited = false;
		}
	}

	pub(crate) fn set_visited(&mut self, index: usize, visited: bool) {
		if let Some(node) = self.state.nodes.get_mut(index) {
			node.visited = visited;
		}
	}

	pub(crate) fn is_visited(&self, index: usize) -> bool {
		self.state.nodes.get(index).is_some_and(|n| n.visited)
	}

	/// Deep copy of the current state for the history stacks.
	pub fn snapshot(&self) -> GraphState {
		self.state.clone()
	}

	/// Replaces the live state, returning the previous one.
	pub fn restore(&mut self, state: GraphState) -> GraphState {
		std::mem::replace(&mut self.state, state)
	}

	pub fn state(&self) -> &GraphState {
		&self.state
	}

	pub fn check_node(&self, index: usize) -> EditResult<()> {
		let len = self.state.nodes.len();
		if index < len {
			Ok(())
		} else {
			Err(EditError::NodeOutOfRange { index, len })
		}
	}

	/// Checks the structural invariants: lockstep rows, valid targets, at most one self-loop.
	pub fn is_consistent(&self) -> bool {
		let len = self.state.nodes.len();
		self.state.adjacency.len() == len
			&& self.state.adjacency.iter().enumerate().all(|(u, row)| {
				row.iter().all(|l| l.target < len)
					&& row.iter().filter(|l| l.target == u).count() <= 1
			})
	}
}
