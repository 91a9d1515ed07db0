use crate::editor::{Mode, ToolbarAction};

/// A toolbar button and the action it resolves to.
#[derive(Clone, Copy, Debug)]
pub struct ToolbarButton {
	pub label: &'static str,
	pub action: ToolbarAction,
}

impl ToolbarButton {
	pub fn mode(&self) -> Option<Mode> {
		match self.action {
			ToolbarAction::SelectMode(mode) => Some(mode),
			_ => None,
		}
	}
}

pub fn toolbar_buttons() -> Vec<ToolbarButton> {
	let modes = Mode::TOOLBAR.into_iter().map(|mode| ToolbarButton {
		label: mode.label(),
		action: ToolbarAction::SelectMode(mode),
	});
	let commands = [
		("Undo", ToolbarAction::Undo),
		("Redo", ToolbarAction::Redo),
		("Clear", ToolbarAction::Clear),
	]
	.into_iter()
	.map(|(label, action)| ToolbarButton { label, action });
	modes.chain(commands).collect()
}
