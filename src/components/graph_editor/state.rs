use log::{debug, warn};

use crate::editor::{EditorConfig, GraphOptions, InputEvent, Outcome, Point, Session, WeightPrompt, parse_weight};

/// Browser-side wrapper around a [`Session`]: canvas size and frame timing.
pub struct EditorState {
	pub session: Session,
	pub width: f64,
	pub height: f64,
	last_frame_ms: Option<f64>,
}

impl EditorState {
	pub fn new(options: GraphOptions, width: f64, height: f64) -> Self {
		Self {
			session: Session::new(options, EditorConfig::default()),
			width,
			height,
			last_frame_ms: None,
		}
	}

	pub fn dispatch(&mut self, event: InputEvent) -> Outcome {
		let outcome = self.session.dispatch(event, &mut BrowserPrompt);
		if !matches!(outcome, Outcome::Ignored) {
			debug!("{event:?} -> {outcome:?}");
		}
		outcome
	}

	/// Advances traversal playback to `now_ms`; returns whether the canvas needs a repaint.
	pub fn frame(&mut self, now_ms: f64) -> bool {
		let dt = self
			.last_frame_ms
			.map_or(0.0, |last| ((now_ms - last) / 1000.0).max(0.0));
		self.last_frame_ms = Some(now_ms);
		self.session.tick(dt);
		self.session.take_repaint()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.session.request_repaint();
	}
}

/// Height available between `top` and the bottom of a viewport `viewport_height` tall.
pub fn fit_below(viewport_height: f64, top: f64) -> f64 {
	(viewport_height - top.max(0.0)).max(1.0)
}

/// `window.prompt`, re-asked until the entry parses or the user cancels.
struct BrowserPrompt;

impl WeightPrompt for BrowserPrompt {
	fn ask_positive_integer(&mut self, anchor: Point) -> Option<u32> {
		let window = web_sys::window()?;
		debug!("Weight prompt at ({:.0}, {:.0})", anchor.x, anchor.y);
		loop {
			match window.prompt_with_message("Enter edge weight (digits)") {
				Ok(Some(text)) => {
					if let Some(weight) = parse_weight(&text) {
						return Some(weight);
					}
				}
				Ok(None) => return None,
				Err(err) => {
					warn!("Weight prompt failed: {err:?}");
					return None;
				}
			}
		}
	}
}
