use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::EditorState;
use crate::editor::geometry::self_loop_circle;
use crate::editor::{Point, Session};

const BACKGROUND: &str = "#ffffff";
const BAND_FILL: &str = "#d3d3d3";
const EDGE_COLOR: &str = "#555555";
const NODE_FILL: &str = "#e0ffff";
const VISITED_FILL: &str = "#90ee90";
const HOVER_FILL: &str = "#ffff00";
const SELECTED_STROKE: &str = "#ff7f0e";
const LABEL_BOX: &str = "#e6e6e6";

pub fn render(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	let session = &state.session;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_status_band(session, state.width, ctx);
	draw_edges(session, ctx);
	draw_nodes(session, ctx);
	draw_self_loops(session, ctx);
}

fn draw_status_band(session: &Session, width: f64, ctx: &CanvasRenderingContext2d) {
	let band = session.config().status_band;
	let options = session.options();
	let yes_no = |flag: bool| if flag { "YES" } else { "NO" };

	ctx.set_fill_style_str(BAND_FILL);
	ctx.fill_rect(0.0, 0.0, width, band);
	ctx.set_stroke_style_str("black");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(0.5, 0.5, width - 1.0, band - 1.0);

	ctx.set_fill_style_str("black");
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let status = format!(
		"Mode: {}    Weighted: {}    Directed: {}",
		session.mode().label(),
		yes_no(options.weighted),
		yes_no(options.directed),
	);
	let _ = ctx.fill_text(&status, 10.0, 10.0);

	let hint = if session.is_terminated() {
		"Session ended"
	} else if session.is_animating() {
		"Traversal running..."
	} else {
		"U: undo    R: redo    Esc: end session"
	};
	let _ = ctx.fill_text(hint, 10.0, 36.0);
}

fn draw_edges(session: &Session, ctx: &CanvasRenderingContext2d) {
	let graph = session.graph();
	let options = graph.options();
	let radius = session.config().node_radius;

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(2.0);
	for (source, _, link) in graph.arcs() {
		// Undirected pairs share one segment, drawn from the lower index.
		if link.target == source || (!options.directed && link.target < source) {
			continue;
		}
		let (a, b) = (graph.nodes()[source].position, graph.nodes()[link.target].position);
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 1.0 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let start = Point::new(a.x + ux * radius, a.y + uy * radius);
		let end = Point::new(b.x - ux * radius, b.y - uy * radius);

		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		ctx.line_to(end.x, end.y);
		ctx.stroke();

		if options.weighted {
			draw_weight(ctx, &link.weight.to_string(), start.midpoint(end));
		}
		if options.directed {
			draw_arrow_head(ctx, start, end);
		}
	}
}

fn draw_nodes(session: &Session, ctx: &CanvasRenderingContext2d) {
	let radius = session.config().node_radius;
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for (idx, node) in session.graph().nodes().iter().enumerate() {
		let Point { x, y } = node.position;
		let fill = if session.hover() == Some(idx) {
			HOVER_FILL
		} else if node.visited {
			VISITED_FILL
		} else {
			NODE_FILL
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		if session.pending_selection() == Some(idx) {
			ctx.set_stroke_style_str(SELECTED_STROKE);
			ctx.set_line_width(3.0);
		} else {
			ctx.set_stroke_style_str("black");
			ctx.set_line_width(1.0);
		}
		ctx.stroke();

		ctx.set_fill_style_str("black");
		let _ = ctx.fill_text(&node.label, x, y);
	}
}

// Drawn last so loops stay visible over neighbouring nodes.
fn draw_self_loops(session: &Session, ctx: &CanvasRenderingContext2d) {
	let graph = session.graph();
	let radius = session.config().node_radius;

	for (idx, node) in graph.nodes().iter().enumerate() {
		let Some(weight) = graph.self_loop_weight(idx) else {
			continue;
		};
		let (center, loop_radius) = self_loop_circle(node.position, radius);

		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(2.0);
		ctx.begin_path();
		let _ = ctx.arc(center.x, center.y, loop_radius, 0.0, 2.0 * PI);
		ctx.stroke();

		if graph.options().directed {
			let tip = Point::new(center.x - loop_radius, center.y);
			draw_arrow_head(ctx, Point::new(tip.x, tip.y - 4.0), tip);
		}
		if graph.options().weighted {
			let above = Point::new(center.x, center.y - loop_radius - 12.0);
			draw_weight(ctx, &weight.to_string(), above);
		}
	}
}

fn draw_arrow_head(ctx: &CanvasRenderingContext2d, from: Point, tip: Point) {
	let (dx, dy) = (tip.x - from.x, tip.y - from.y);
	let len = (dx * dx + dy * dy).sqrt();
	if len < 1.0 {
		return;
	}
	let (ux, uy) = (dx / len, dy / len);
	let (back, side) = (12.0, 6.0);
	let (bx, by) = (tip.x - ux * back, tip.y - uy * back);
	let (px, py) = (-uy * side, ux * side);

	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(bx + px, by + py);
	ctx.line_to(bx - px, by - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_weight(ctx: &CanvasRenderingContext2d, text: &str, at: Point) {
	// Rough width; avoids pulling in TextMetrics.
	let (w, h) = (text.len() as f64 * 8.0, 16.0);
	ctx.set_fill_style_str(LABEL_BOX);
	ctx.fill_rect(at.x - w / 2.0 - 4.0, at.y - h / 2.0 - 2.0, w + 8.0, h + 4.0);

	ctx.set_fill_style_str("black");
	ctx.set_font("13px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, at.x, at.y);
}
