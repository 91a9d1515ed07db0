//! The weight prompt service consumed by a session.

use super::geometry::Point;
use super::session::{InputEvent, Outcome, Session};

/// Longest accepted weight entry, in digits.
pub const MAX_WEIGHT_DIGITS: usize = 6;

/// A modal "enter a positive integer" dialog.
pub trait WeightPrompt {
	/// Blocks until the user enters a weight or cancels (`None`).
	fn ask_positive_integer(&mut self, anchor: Point) -> Option<u32>;
}

/// Parses prompt input: 1 to 6 ASCII digits. A zero becomes `1`.
pub fn parse_weight(input: &str) -> Option<u32> {
	let digits = input.trim();
	if digits.is_empty()
		|| digits.len() > MAX_WEIGHT_DIGITS
		|| !digits.bytes().all(|b| b.is_ascii_digit())
	{
		return None;
	}
	digits.parse::<u32>().ok().map(|w| w.max(1))
}

impl Session {
	/// Handles `event`, answering any weight request through `prompt` before returning.
	pub fn dispatch(&mut self, event: InputEvent, prompt: &mut impl WeightPrompt) -> Outcome {
		match self.handle(event) {
			Outcome::WeightRequested { anchor } => {
				let weight = prompt.ask_positive_integer(anchor);
				self.submit_weight(weight)
			}
			outcome => outcome,
		}
	}
}
