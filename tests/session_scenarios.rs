//! End-to-end sessions driven purely through input events.

use std::collections::VecDeque;

use graph_editor_canvas::editor::{
	EditorConfig, GraphOptions, InputEvent, Key, Mode, Outcome, Point, Session, ToolbarAction,
	TraversalKind, WeightPrompt,
};

/// Answers weight prompts from a script and records where they were anchored.
#[derive(Default)]
struct ScriptedPrompt {
	answers: VecDeque<Option<u32>>,
	anchors: Vec<Point>,
}

impl ScriptedPrompt {
	fn answering(answers: impl IntoIterator<Item = Option<u32>>) -> Self {
		Self {
			answers: answers.into_iter().collect(),
			anchors: Vec::new(),
		}
	}
}

impl WeightPrompt for ScriptedPrompt {
	fn ask_positive_integer(&mut self, anchor: Point) -> Option<u32> {
		self.anchors.push(anchor);
		self.answers.pop_front().flatten()
	}
}

struct Driver {
	session: Session,
	prompt: ScriptedPrompt,
	clock_ms: f64,
}

impl Driver {
	fn new(weighted: bool, directed: bool) -> Self {
		Self {
			session: Session::new(
				GraphOptions::new(weighted, directed),
				EditorConfig::default(),
			),
			prompt: ScriptedPrompt::default(),
			clock_ms: 0.0,
		}
	}

	fn send(&mut self, event: InputEvent) -> Outcome {
		self.session.dispatch(event, &mut self.prompt)
	}

	/// Clicks well apart in time so nothing reads as a double-click.
	fn click(&mut self, p: Point) -> Outcome {
		self.clock_ms += 1_000.0;
		let at_ms = self.clock_ms;
		self.send(InputEvent::Click { point: p, at_ms })
	}

	fn mode(&mut self, mode: Mode) {
		self.send(InputEvent::Toolbar(ToolbarAction::SelectMode(mode)));
	}

	fn key(&mut self, c: char) -> Outcome {
		self.send(InputEvent::Key(Key::Char(c)))
	}

	fn place(&mut self, points: &[Point]) {
		self.mode(Mode::AddNode);
		for &p in points {
			self.click(p);
		}
	}

	fn connect(&mut self, edges: &[(Point, Point)]) {
		self.mode(Mode::AddEdge);
		for &(a, b) in edges {
			self.click(a);
			self.click(b);
		}
	}

	/// Starts a traversal at `start` and plays it to completion, returning the visit order.
	fn play(&mut self, kind: TraversalKind, start: Point) -> Vec<usize> {
		self.mode(match kind {
			TraversalKind::Bfs => Mode::Bfs,
			TraversalKind::Dfs => Mode::Dfs,
		});
		let Outcome::TraversalStarted { start, .. } = self.click(start) else {
			return Vec::new();
		};
		let mut order = vec![start];
		while self.session.is_animating() {
			if let Some(visit) = self.session.tick(0.25) {
				order.push(visit.node);
			}
		}
		order
	}
}

/// Five nodes spread out so no edge passes through an unrelated node.
fn layout() -> [Point; 5] {
	[
		Point::new(100.0, 150.0),
		Point::new(300.0, 120.0),
		Point::new(300.0, 400.0),
		Point::new(550.0, 160.0),
		Point::new(750.0, 300.0),
	]
}

fn sample_directed() -> Driver {
	let p = layout();
	let mut d = Driver::new(false, true);
	d.place(&p);
	d.connect(&[(p[0], p[1]), (p[0], p[2]), (p[1], p[3]), (p[3], p[4])]);
	d
}

#[test]
fn bfs_and_dfs_play_back_in_the_documented_order() {
	let p = layout();
	let mut d = sample_directed();
	assert_eq!(d.play(TraversalKind::Bfs, p[0]), vec![0, 1, 2, 3, 4]);
	assert_eq!(d.play(TraversalKind::Dfs, p[0]), vec![0, 1, 3, 4, 2]);
}

#[test]
fn traversal_is_not_an_undo_step() {
	let p = layout();
	let mut d = sample_directed();
	let depth = d.session.history().undo_depth();
	d.play(TraversalKind::Bfs, p[0]);
	assert_eq!(d.session.history().undo_depth(), depth);

	// Undo rewinds the last edge and drops the highlight captured before the run...
	assert_eq!(d.key('u'), Outcome::Updated);
	assert!(d.session.graph().links(3).is_empty());
	assert!(d.session.graph().nodes().iter().all(|n| !n.visited));
	// ...and redo brings back the state current at undo time, highlight included.
	assert_eq!(d.key('R'), Outcome::Updated);
	assert!(d.session.graph().nodes().iter().all(|n| n.visited));
}

#[test]
fn deleting_a_node_renumbers_arcs() {
	let p = layout();
	let mut d = Driver::new(false, true);
	d.place(&p[..4]);
	d.connect(&[(p[0], p[2])]);
	d.mode(Mode::DeleteNode);
	assert_eq!(d.click(p[1]), Outcome::Updated);

	let graph = d.session.graph();
	assert_eq!(graph.node_count(), 3);
	assert_eq!(graph.links(0).len(), 1);
	assert_eq!(graph.links(0)[0].target, 1);
	assert!(graph.is_consistent());

	d.key('u');
	assert_eq!(d.session.graph().node_count(), 4);
	assert_eq!(d.session.graph().links(0)[0].target, 2);
}

#[test]
fn undirected_edge_deletion_leaves_the_reciprocal_arc() {
	let p = layout();
	let mut d = Driver::new(false, false);
	d.place(&p[..2]);
	d.connect(&[(p[0], p[1])]);
	assert_eq!(d.session.graph().links(1)[0].target, 0);

	let middle = p[0].midpoint(p[1]);
	d.mode(Mode::DeleteEdge);
	assert_eq!(d.click(middle), Outcome::Updated);
	assert!(d.session.graph().links(0).is_empty());
	// The 1 -> 0 arc survives but is no longer drawn or hit in undirected mode.
	assert_eq!(d.session.graph().links(1).len(), 1);
	assert_eq!(d.click(middle), Outcome::Ignored);
}

#[test]
fn weighted_edges_and_loops_use_the_prompt() {
	let p = layout();
	let mut d = Driver::new(true, true);
	d.place(&p[..2]);
	d.prompt = ScriptedPrompt::answering([Some(5), None, Some(3)]);

	d.connect(&[(p[0], p[1])]);
	assert_eq!(d.session.graph().links(0)[0].weight, 5);

	let depth = d.session.history().undo_depth();
	d.mode(Mode::SelfLoop);
	assert_eq!(d.click(p[1]), Outcome::Updated);
	assert!(!d.session.graph().has_self_loop(1));
	assert_eq!(d.session.history().undo_depth(), depth);

	d.click(p[1]);
	assert_eq!(d.session.graph().self_loop_weight(1), Some(3));
	assert_eq!(
		d.prompt.anchors,
		vec![
			p[0].midpoint(p[1]),
			Point::new(p[1].x, p[1].y - 32.0),
			Point::new(p[1].x, p[1].y - 32.0),
		]
	);
}

#[test]
fn self_loop_can_be_deleted_by_clicking_its_circle() {
	let p = layout();
	let mut d = Driver::new(false, false);
	d.place(&p[..1]);
	d.mode(Mode::SelfLoop);
	d.click(p[0]);
	assert!(d.session.graph().has_self_loop(0));

	d.mode(Mode::DeleteEdge);
	assert_eq!(d.click(Point::new(p[0].x, p[0].y - 33.0)), Outcome::Updated);
	assert!(!d.session.graph().has_self_loop(0));
}

#[test]
fn new_edit_after_undo_clears_redo() {
	let p = layout();
	let mut d = Driver::new(false, false);
	d.place(&p[..3]);
	d.key('u');
	assert!(d.session.history().can_redo());
	d.place(&p[3..4]);
	assert!(!d.session.history().can_redo());
	assert_eq!(d.key('r'), Outcome::Ignored);
	assert_eq!(d.session.graph().nodes()[2].position, p[3]);
}

#[test]
fn mode_change_drops_the_pending_selection() {
	let p = layout();
	let mut d = Driver::new(false, true);
	d.place(&p[..2]);
	d.mode(Mode::AddEdge);
	d.click(p[0]);
	assert_eq!(d.session.pending_selection(), Some(0));
	d.mode(Mode::AddEdge);
	assert_eq!(d.session.pending_selection(), None);
	d.click(p[1]);
	assert_eq!(d.session.pending_selection(), Some(1));
	assert!(d.session.graph().links(0).is_empty());
}

#[test]
fn escape_ends_everything() {
	let p = layout();
	let mut d = sample_directed();
	assert_eq!(d.send(InputEvent::Key(Key::Escape)), Outcome::Terminated);
	assert_eq!(d.key('u'), Outcome::Terminated);
	assert_eq!(d.click(p[0]), Outcome::Terminated);
	assert_eq!(d.session.graph().node_count(), 5);
}
