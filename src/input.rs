use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::{AppAction, EditorAction, FileAction, LayoutAction, SystemAction};

/// Maps terminal events to actions. Anything without a binding is dropped.
pub(crate) struct InputHandler;

impl InputHandler {
	pub(crate) fn new() -> Self {
		Self
	}

	pub(crate) fn action(&self, event: &Event) -> Option<AppAction> {
		match event {
			Event::Resize(width, height) => {
				Some(AppAction::Layout(LayoutAction::ViewportResized { width: *width, height: *height }))
			}
			Event::Key(key) if key.kind != KeyEventKind::Release => self.key_action(key),
			_ => None,
		}
	}

	fn key_action(&self, key: &KeyEvent) -> Option<AppAction> {
		if key.modifiers.contains(KeyModifiers::CONTROL) {
			return match key.code {
				KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'q') => Some(AppAction::System(SystemAction::Quit)),
				KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'s') => Some(AppAction::File(FileAction::SaveRequested)),
				_ => None,
			};
		}
		if key.modifiers.contains(KeyModifiers::ALT) {
			return None;
		}

		let action = match key.code {
			KeyCode::Enter => EditorAction::NewLine,
			KeyCode::Backspace => EditorAction::Backspace,
			KeyCode::Up => EditorAction::MoveUp,
			KeyCode::Down => EditorAction::MoveDown,
			KeyCode::Left => EditorAction::MoveLeft,
			KeyCode::Right => EditorAction::MoveRight,
			KeyCode::Tab => EditorAction::InsertChar(b'\t'),
			KeyCode::Char(ch) if ch.is_ascii() && !ch.is_ascii_control() => {
				EditorAction::InsertChar(u8::try_from(ch).ok()?)
			}
			_ => return None,
		};
		Some(AppAction::Editor(action))
	}
}
