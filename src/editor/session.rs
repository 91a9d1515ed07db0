//! The interactive editing session: current mode, pending selection, and the routing of
//! input events into graph edits, history moves and traversal runs.

use log::{debug, info};

use super::config::{EditorConfig, GraphOptions};
use super::error::EditResult;
use super::geometry::Point;
use super::graph::Graph;
use super::hit_test::{find_edge_near, find_node_at};
use super::history::History;
use super::traversal::{Animator, TraversalKind, VisitEvent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	AddNode,
	AddEdge,
	Bfs,
	Dfs,
	SelfLoop,
	DeleteNode,
	DeleteEdge,
	Idle,
}

impl Mode {
	/// Modes offered on the toolbar, in display order.
	pub const TOOLBAR: [Mode; 7] = [
		Mode::AddNode,
		Mode::AddEdge,
		Mode::Bfs,
		Mode::Dfs,
		Mode::SelfLoop,
		Mode::DeleteNode,
		Mode::DeleteEdge,
	];

	pub fn label(self) -> &'static str {
		match self {
			Mode::AddNode => "Add Node",
			Mode::AddEdge => "Add Edge",
			Mode::Bfs => "BFS",
			Mode::Dfs => "DFS",
			Mode::SelfLoop => "Self Loop",
			Mode::DeleteNode => "Delete Node",
			Mode::DeleteEdge => "Delete Edge",
			Mode::Idle => "Idle",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
	Escape,
	Char(char),
}

impl Key {
	/// Maps a DOM `KeyboardEvent.key` value.
	pub fn from_dom(key: &str) -> Option<Key> {
		if key == "Escape" {
			return Some(Key::Escape);
		}
		let mut chars = key.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Some(Key::Char(c)),
			_ => None,
		}
	}
}

/// Toolbar buttons, already resolved by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
	SelectMode(Mode),
	Undo,
	Redo,
	Clear,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
	/// A click at `point`, timestamped in milliseconds.
	Click { point: Point, at_ms: f64 },
	PointerMove(Point),
	/// The pointer left the canvas.
	PointerLeave,
	Key(Key),
	Toolbar(ToolbarAction),
}

/// What handling an event did, so the host knows whether to prompt or repaint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
	Ignored,
	Updated,
	/// The host must answer with [`Session::submit_weight`] before anything else happens.
	WeightRequested { anchor: Point },
	TraversalStarted { kind: TraversalKind, start: usize },
	Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WeightedEdit {
	Edge { from: usize, to: usize },
	SelfLoop { node: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct LastClick {
	node: usize,
	at_ms: f64,
}

#[derive(Clone, Debug, Default)]
struct InteractionState {
	mode: Mode,
	pending_selection: Option<usize>,
	last_click: Option<LastClick>,
}

pub struct Session {
	graph: Graph,
	history: History,
	animator: Animator,
	interaction: InteractionState,
	config: EditorConfig,
	awaiting_weight: Option<WeightedEdit>,
	hover: Option<usize>,
	/// Last known pointer position; hover is recomputed from it after the graph changes.
	pointer: Option<Point>,
	terminated: bool,
	dirty: bool,
}

impl Session {
	pub fn new(options: GraphOptions, config: EditorConfig) -> Self {
		info!(
			"Session started (weighted: {}, directed: {})",
			options.weighted, options.directed
		);
		Self {
			graph: Graph::new(options),
			history: History::new(config.undo_capacity),
			animator: Animator::new(config.visit_delay_secs),
			interaction: InteractionState::default(),
			config,
			awaiting_weight: None,
			hover: None,
			pointer: None,
			terminated: false,
			dirty: true,
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn options(&self) -> GraphOptions {
		self.graph.options()
	}

	pub fn mode(&self) -> Mode {
		self.interaction.mode
	}

	pub fn pending_selection(&self) -> Option<usize> {
		self.interaction.pending_selection
	}

	pub fn hover(&self) -> Option<usize> {
		self.hover
	}

	pub fn is_terminated(&self) -> bool {
		self.terminated
	}

	pub fn is_animating(&self) -> bool {
		self.animator.is_running()
	}

	pub fn is_awaiting_weight(&self) -> bool {
		self.awaiting_weight.is_some()
	}

	/// Forces the next [`Session::take_repaint`] to report a change.
	pub fn request_repaint(&mut self) {
		self.dirty = true;
	}

	/// Returns whether anything changed since the last call, and clears the flag.
	pub fn take_repaint(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}

	pub fn handle(&mut self, event: InputEvent) -> Outcome {
		if self.terminated {
			return Outcome::Terminated;
		}
		if self.awaiting_weight.is_some() || self.animator.is_running() {
			debug!("Input {event:?} ignored while busy");
			return Outcome::Ignored;
		}
		match event {
			InputEvent::Click { point, at_ms } => {
				self.pointer = Some(point);
				self.click(point, at_ms)
			}
			InputEvent::PointerMove(point) => {
				self.pointer = Some(point);
				self.set_hover(self.node_at(point))
			}
			InputEvent::PointerLeave => {
				self.pointer = None;
				self.set_hover(None)
			}
			InputEvent::Key(key) => self.key(key),
			InputEvent::Toolbar(action) => self.toolbar(action),
		}
	}

	/// Answers a pending weight request. `None` means the user canceled.
	pub fn submit_weight(&mut self, weight: Option<u32>) -> Outcome {
		let Some(edit) = self.awaiting_weight.take() else {
			return Outcome::Ignored;
		};
		match weight {
			Some(weight) => self.apply_weighted(edit, weight.max(1)),
			None => {
				debug!("Weight prompt canceled for {edit:?}");
				self.interaction.pending_selection = None;
				self.dirty = true;
				Outcome::Updated
			}
		}
	}

	/// Advances a running traversal by `dt_secs`.
	pub fn tick(&mut self, dt_secs: f64) -> Option<VisitEvent> {
		if !self.animator.is_running() {
			return None;
		}
		let event = self.animator.tick(dt_secs, &mut self.graph);
		if let Some(visit) = event {
			debug!("{} visit #{}: node {}", visit.kind, visit.ordinal, visit.node);
		}
		if !self.animator.is_running() {
			self.hover = self.node_under_pointer();
			self.dirty = true;
		} else if event.is_some() {
			self.dirty = true;
		}
		event
	}

	pub fn undo(&mut self) -> bool {
		let changed = self.history.undo(&mut self.graph);
		if changed {
			self.after_structural_change();
		}
		changed
	}

	pub fn redo(&mut self) -> bool {
		let changed = self.history.redo(&mut self.graph);
		if changed {
			self.after_structural_change();
		}
		changed
	}

	fn key(&mut self, key: Key) -> Outcome {
		match key {
			Key::Escape => {
				info!("Session terminated");
				self.terminated = true;
				self.dirty = true;
				Outcome::Terminated
			}
			Key::Char('u' | 'U') => changed(self.undo()),
			Key::Char('r' | 'R') => changed(self.redo()),
			Key::Char(_) => Outcome::Ignored,
		}
	}

	fn toolbar(&mut self, action: ToolbarAction) -> Outcome {
		match action {
			ToolbarAction::SelectMode(mode) => {
				self.interaction.mode = mode;
				self.interaction.pending_selection = None;
				self.dirty = true;
				Outcome::Updated
			}
			ToolbarAction::Undo => changed(self.undo()),
			ToolbarAction::Redo => changed(self.redo()),
			ToolbarAction::Clear => {
				self.interaction.pending_selection = None;
				if self.graph.is_empty() {
					return Outcome::Ignored;
				}
				self.commit("clear", |graph| {
					graph.clear();
					Ok(())
				})
			}
		}
	}

	fn set_hover(&mut self, hover: Option<usize>) -> Outcome {
		if hover == self.hover {
			return Outcome::Ignored;
		}
		self.hover = hover;
		self.dirty = true;
		Outcome::Updated
	}

	fn click(&mut self, point: Point, at_ms: f64) -> Outcome {
		match self.interaction.mode {
			Mode::AddNode => {
				if !self.config.in_canvas_area(point.y) {
					return Outcome::Ignored;
				}
				self.commit("add node", |graph| {
					graph.add_node(point);
					Ok(())
				})
			}
			Mode::AddEdge => match self.node_at(point) {
				Some(node) => self.edge_click(node, at_ms),
				None => Outcome::Ignored,
			},
			Mode::SelfLoop => match self.node_at(point) {
				Some(node) if self.graph.has_self_loop(node) => {
					debug!("Node {node} already has a self-loop");
					Outcome::Ignored
				}
				Some(node) => self.request_weight(WeightedEdit::SelfLoop { node }),
				None => Outcome::Ignored,
			},
			Mode::DeleteNode => match self.node_at(point) {
				Some(node) => self.commit("remove node", |graph| graph.remove_node(node).map(drop)),
				None => Outcome::Ignored,
			},
			Mode::DeleteEdge => {
				let hit = find_edge_near(
					&self.graph,
					point,
					self.config.edge_hit_threshold,
					self.config.node_radius,
				);
				match hit {
					Some(hit) => self.commit("remove edge", |graph| {
						graph.remove_edge_at(hit.source, hit.slot).map(drop)
					}),
					None => Outcome::Ignored,
				}
			}
			Mode::Bfs => self.start_traversal(TraversalKind::Bfs, point),
			Mode::Dfs => self.start_traversal(TraversalKind::Dfs, point),
			Mode::Idle => Outcome::Ignored,
		}
	}

	// A second click on the same node inside the double-click window cancels the selection.
	fn edge_click(&mut self, node: usize, at_ms: f64) -> Outcome {
		let window = self.config.double_click_ms;
		if let Some(last) = self.interaction.last_click
			&& last.node == node
			&& at_ms - last.at_ms <= window
		{
			self.interaction.last_click = None;
			self.interaction.pending_selection = None;
			self.dirty = true;
			return Outcome::Updated;
		}

		match self.interaction.pending_selection {
			None => {
				self.interaction.pending_selection = Some(node);
				self.interaction.last_click = Some(LastClick { node, at_ms });
				self.dirty = true;
				Outcome::Updated
			}
			Some(from) if from != node => self.request_weight(WeightedEdit::Edge { from, to: node }),
			Some(_) => Outcome::Ignored,
		}
	}

	fn request_weight(&mut self, edit: WeightedEdit) -> Outcome {
		if !self.graph.options().weighted {
			return self.apply_weighted(edit, 1);
		}
		let position = |i: usize| self.graph.node(i).map(|n| n.position).unwrap_or_default();
		let anchor = match edit {
			WeightedEdit::Edge { from, to } => position(from).midpoint(position(to)),
			WeightedEdit::SelfLoop { node } => {
				let p = position(node);
				Point::new(p.x, p.y - self.config.node_radius - 10.0)
			}
		};
		self.awaiting_weight = Some(edit);
		Outcome::WeightRequested { anchor }
	}

	fn apply_weighted(&mut self, edit: WeightedEdit, weight: u32) -> Outcome {
		match edit {
			WeightedEdit::Edge { from, to } => {
				self.interaction.pending_selection = None;
				let outcome = self.commit("add edge", |graph| graph.add_edge(from, to, weight));
				self.dirty = true;
				outcome
			}
			WeightedEdit::SelfLoop { node } => {
				self.commit("add self-loop", |graph| graph.add_self_loop(node, weight))
			}
		}
	}

	fn start_traversal(&mut self, kind: TraversalKind, point: Point) -> Outcome {
		let Some(start) = self.node_at(point) else {
			return Outcome::Ignored;
		};
		match self.animator.start(kind, &mut self.graph, start) {
			Some(first) => {
				debug!("{kind} visit #0: node {}", first.node);
				// Visits are painted without a hover highlight.
				self.hover = None;
				self.dirty = true;
				Outcome::TraversalStarted { kind, start }
			}
			None => Outcome::Ignored,
		}
	}

	/// Applies an edit and records the prior state only if it succeeded.
	fn commit(&mut self, what: &str, edit: impl FnOnce(&mut Graph) -> EditResult<()>) -> Outcome {
		let before = self.graph.snapshot();
		match edit(&mut self.graph) {
			Ok(()) => {
				debug!("{what}: {} nodes", self.graph.node_count());
				self.history.record(before);
				self.after_structural_change();
				Outcome::Updated
			}
			Err(err) => {
				debug!("{what} skipped: {err}");
				Outcome::Ignored
			}
		}
	}

	// Indices held outside the graph may now point past the end or at a different node.
	fn after_structural_change(&mut self) {
		let len = self.graph.node_count();
		self.interaction.pending_selection = self.interaction.pending_selection.filter(|&i| i < len);
		self.hover = self.node_under_pointer();
		if self.interaction.last_click.is_some_and(|c| c.node >= len) {
			self.interaction.last_click = None;
		}
		self.dirty = true;
	}

	fn node_at(&self, point: Point) -> Option<usize> {
		find_node_at(&self.graph, point, self.config.node_radius)
	}

	fn node_under_pointer(&self) -> Option<usize> {
		self.pointer.and_then(|p| self.node_at(p))
	}
}

fn changed(did_change: bool) -> Outcome {
	if did_change {
		Outcome::Updated
	} else {
		Outcome::Ignored
	}
}
