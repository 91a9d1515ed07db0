//! Errors returned by graph mutators. The session absorbs them as no-ops.

use thiserror::Error;

/// Why a structural edit was refused. The graph is untouched whenever one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
	#[error("node {index} out of range (graph has {len} nodes)")]
	NodeOutOfRange { index: usize, len: usize },

	#[error("slot {slot} out of range for node {node} ({len} arcs)")]
	SlotOutOfRange { node: usize, slot: usize, len: usize },

	#[error("node {0} already has a self-loop")]
	SelfLoopExists(usize),
}

pub type EditResult<T> = Result<T, EditError>;
