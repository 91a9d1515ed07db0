//! Graph editing core: model, hit-testing, undo/redo history, traversal playback and the
//! interactive session that ties them together. Free of any browser dependency.

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod hit_test;
pub mod history;
pub mod prompt;
pub mod session;
pub mod traversal;

pub use config::{EditorConfig, GraphOptions};
pub use error::{EditError, EditResult};
pub use geometry::Point;
pub use graph::{Graph, GraphState, Link, Node};
pub use hit_test::{EdgeHit, find_edge_near, find_node_at};
pub use history::History;
pub use prompt::{WeightPrompt, parse_weight};
pub use session::{InputEvent, Key, Mode, Outcome, Session, ToolbarAction};
pub use traversal::{Animator, TraversalKind, TraversalRun, VisitEvent, bfs_order, dfs_order};
