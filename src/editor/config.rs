//! Session configuration: the fixed graph options and the tunable editor constants.

/// Graph-wide flags chosen at startup and immutable for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphOptions {
	/// Edge weights are prompted for and displayed.
	pub weighted: bool,
	/// Edges are one-way arcs; otherwise each edge is stored as two reciprocal arcs.
	pub directed: bool,
}

impl GraphOptions {
	pub const fn new(weighted: bool, directed: bool) -> Self {
		Self { weighted, directed }
	}

	/// Parses a query-string flag value such as `1`, `true` or `yes`.
	pub fn parse_flag(value: Option<&str>) -> bool {
		matches!(
			value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
			Some("1" | "true" | "yes" | "on")
		)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	pub node_radius: f64,
	/// Maximum distance from a straight edge that still counts as a hit.
	pub edge_hit_threshold: f64,
	pub double_click_ms: f64,
	pub undo_capacity: usize,
	/// Pause between traversal visits.
	pub visit_delay_secs: f64,
	/// Height of the status band at the top of the canvas.
	pub status_band: f64,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			node_radius: 22.0,
			edge_hit_threshold: 8.0,
			double_click_ms: 400.0,
			undo_capacity: 120,
			visit_delay_secs: 0.22,
			status_band: 70.0,
		}
	}
}

impl EditorConfig {
	/// Whether a click at `y` is inside the drawable area where nodes may be placed.
	pub fn in_canvas_area(&self, y: f64) -> bool {
		y > self.status_band + 10.0
	}
}
