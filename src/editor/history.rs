//! Linear undo/redo over full graph snapshots.

use std::collections::VecDeque;

use super::graph::{Graph, GraphState};

#[derive(Clone, Debug)]
pub struct History {
	undo: VecDeque<GraphState>,
	redo: Vec<GraphState>,
	capacity: usize,
}

impl History {
	/// `capacity` bounds the undo stack; the oldest snapshot is evicted first.
	pub fn new(capacity: usize) -> Self {
		Self {
			undo: VecDeque::with_capacity(capacity.min(256)),
			redo: Vec::new(),
			capacity,
		}
	}

	pub fn undo_depth(&self) -> usize {
		self.undo.len()
	}

	pub fn redo_depth(&self) -> usize {
		self.redo.len()
	}

	pub fn can_undo(&self) -> bool {
		!self.undo.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo.is_empty()
	}

	/// Records `graph` before a structural edit. Always discards the redo stack.
	pub fn snapshot(&mut self, graph: &Graph) {
		self.record(graph.snapshot());
	}

	/// Records a state captured just before an edit that has since succeeded.
	pub fn record(&mut self, before: GraphState) {
		self.push_undo(before);
		self.redo.clear();
	}

	/// Returns false when there was nothing to undo.
	pub fn undo(&mut self, graph: &mut Graph) -> bool {
		let Some(previous) = self.undo.pop_back() else {
			return false;
		};
		self.redo.push(graph.restore(previous));
		true
	}

	/// Returns false when there was nothing to redo.
	pub fn redo(&mut self, graph: &mut Graph) -> bool {
		let Some(next) = self.redo.pop() else {
			return false;
		};
		let current = graph.restore(next);
		self.push_undo(current);
		true
	}

	fn push_undo(&mut self, state: GraphState) {
		if self.capacity == 0 {
			return;
		}
		while self.undo.len() >= self.capacity {
			self.undo.pop_front();
		}
		self.undo.push_back(state);
	}
}
