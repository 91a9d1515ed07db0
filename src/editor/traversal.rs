//! Breadth-first and depth-first traversal, stepped one visit at a time so the host can
//! animate it.

use std::collections::VecDeque;
use std::fmt;

use log::info;

use super::graph::Graph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalKind {
	Bfs,
	Dfs,
}

impl fmt::Display for TraversalKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			TraversalKind::Bfs => "BFS",
			TraversalKind::Dfs => "DFS",
		})
	}
}

/// A node reached by a running traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisitEvent {
	pub kind: TraversalKind,
	pub node: usize,
	/// Zero-based position in the visit order.
	pub ordinal: usize,
}

/// An in-progress traversal. Holds only the frontier; `visited` flags live on the graph.
#[derive(Clone, Debug)]
pub struct TraversalRun {
	kind: TraversalKind,
	start: usize,
	frontier: VecDeque<usize>,
	emitted: usize,
}

impl TraversalRun {
	/// Clears all visited flags and seeds the frontier. `None` for an unknown start node.
	pub fn start(kind: TraversalKind, graph: &mut Graph, start: usize) -> Option<Self> {
		graph.check_node(start).ok()?;
		graph.reset_visited_flags();
		if kind == TraversalKind::Bfs {
			graph.set_visited(start, true);
		}
		Some(Self {
			kind,
			start,
			frontier: VecDeque::from([start]),
			emitted: 0,
		})
	}

	pub fn kind(&self) -> TraversalKind {
		self.kind
	}

	pub fn start_node(&self) -> usize {
		self.start
	}

	/// Advances to the next visit, or `None` once the frontier is exhausted.
	pub fn step(&mut self, graph: &mut Graph) -> Option<VisitEvent> {
		let node = match self.kind {
			TraversalKind::Bfs => self.step_bfs(graph)?,
			TraversalKind::Dfs => self.step_dfs(graph)?,
		};
		let event = VisitEvent {
			kind: self.kind,
			node,
			ordinal: self.emitted,
		};
		self.emitted += 1;
		Some(event)
	}

	// Neighbors are marked on discovery, so each node is enqueued once.
	fn step_bfs(&mut self, graph: &mut Graph) -> Option<usize> {
		let u = self.frontier.pop_front()?;
		for i in 0..graph.links(u).len() {
			let v = graph.links(u)[i].target;
			if !graph.is_visited(v) {
				graph.set_visited(v, true);
				self.frontier.push_back(v);
			}
		}
		Some(u)
	}

	// Neighbors go on the stack in reverse so they pop in adjacency order.
	fn step_dfs(&mut self, graph: &mut Graph) -> Option<usize> {
		loop {
			let u = self.frontier.pop_back()?;
			if graph.is_visited(u) {
				continue;
			}
			graph.set_visited(u, true);
			for link in graph.links(u).iter().rev() {
				if !graph.is_visited(link.target) {
					self.frontier.push_back(link.target);
				}
			}
			return Some(u);
		}
	}
}

/// Paces a [`TraversalRun`]: one visit immediately, then one per `delay_secs`.
#[derive(Clone, Debug)]
pub struct Animator {
	run: Option<TraversalRun>,
	elapsed: f64,
	delay_secs: f64,
}

impl Animator {
	pub fn new(delay_secs: f64) -> Self {
		Self {
			run: None,
			elapsed: 0.0,
			delay_secs,
		}
	}

	pub fn is_running(&self) -> bool {
		self.run.is_some()
	}

	/// Begins a run and emits its first visit. `None` (and no run) for an unknown start.
	pub fn start(
		&mut self,
		kind: TraversalKind,
		graph: &mut Graph,
		start: usize,
	) -> Option<VisitEvent> {
		let mut run = TraversalRun::start(kind, graph, start)?;
		info!("{kind} started at node {start}");
		let first = run.step(graph);
		self.run = Some(run);
		self.elapsed = 0.0;
		first
	}

	/// Advances by `dt` seconds. At most one visit is emitted per call.
	pub fn tick(&mut self, dt: f64, graph: &mut Graph) -> Option<VisitEvent> {
		let run = self.run.as_mut()?;
		self.elapsed += dt;
		if self.elapsed < self.delay_secs {
			return None;
		}
		self.elapsed = 0.0;
		let event = run.step(graph);
		if event.is_none() {
			info!("{} from node {} finished", run.kind(), run.start_node());
			self.run = None;
		}
		event
	}
}

fn visit_order(kind: TraversalKind, graph: &Graph, start: usize) -> Vec<usize> {
	let mut scratch = graph.clone();
	let Some(mut run) = TraversalRun::start(kind, &mut scratch, start) else {
		return Vec::new();
	};
	std::iter::from_fn(|| run.step(&mut scratch))
		.map(|e| e.node)
		.collect()
}

/// Full BFS visit order from `start`, leaving `graph` untouched.
pub fn bfs_order(graph: &Graph, start: usize) -> Vec<usize> {
	visit_order(TraversalKind::Bfs, graph, start)
}

/// Full DFS visit order from `start`, leaving `graph` untouched.
pub fn dfs_order(graph: &Graph, start: usize) -> Vec<usize> {
	visit_order(TraversalKind::Dfs, graph, start)
}
