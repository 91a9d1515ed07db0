//! Canvas-space geometry shared by hit-testing and the renderer.

/// A point in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_sq(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// Distance from `p` to the segment `a..b`, with the projection clamped to the segment.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let (vx, vy) = (b.x - a.x, b.y - a.y);
	let (wx, wy) = (p.x - a.x, p.y - a.y);
	let len_sq = vx * vx + vy * vy;
	// Degenerate segment: both endpoints coincide.
	let t = if len_sq < 1e-6 {
		0.0
	} else {
		((vx * wx + vy * wy) / len_sq).clamp(0.0, 1.0)
	};
	p.distance_sq(Point::new(a.x + t * vx, a.y + t * vy)).sqrt()
}

/// The circle a self-loop occupies above its node, as `(center, radius)`.
pub fn self_loop_circle(center: Point, node_radius: f64) -> (Point, f64) {
	let half = node_radius / 2.0;
	(
		Point::new(center.x, center.y - node_radius - half),
		half + 8.0,
	)
}
