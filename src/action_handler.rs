use std::io::{self, ErrorKind};
use std::ops::ControlFlow;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::action::{AppAction, EditorAction, FileAction, LayoutAction, SystemAction};
use crate::app::AppError;
use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::io_gateway::IoGateway;
use crate::view::Window;

/// Applies actions to the window. Returns `Break` when the editor should quit.
pub(crate) struct ActionHandler {
	path:       Option<PathBuf>,
	line_slots: usize,
	line_bytes: usize,
}

impl ActionHandler {
	pub(crate) fn new(path: Option<PathBuf>, config: &EditorConfig) -> Self {
		Self { path, line_slots: config.initial_lines, line_bytes: config.initial_line_bytes }
	}

	pub(crate) fn apply(
		&mut self,
		window: &mut Window,
		io_gateway: &IoGateway,
		action: AppAction,
	) -> Result<ControlFlow<()>, AppError> {
		match action {
			AppAction::Editor(editor_action) => apply_editor_action(window, editor_action)?,
			AppAction::Layout(LayoutAction::ViewportResized { width, height }) => window.resize(width, height),
			AppAction::File(FileAction::SaveRequested) => self.save(window, io_gateway)?,
			AppAction::File(FileAction::LoadCompleted { path, result }) => self.load_completed(window, path, result)?,
			AppAction::File(FileAction::SaveCompleted { path, revision, result }) => match result {
				Ok(()) => {
					info!(path = %path.display(), revision, "file saved");
					window.mark_saved(revision);
				}
				Err(err) => error!("save {} failed: {err}", path.display()),
			},
			AppAction::System(SystemAction::Quit) => return Ok(ControlFlow::Break(())),
		}
		Ok(ControlFlow::Continue(()))
	}

	fn save(&self, window: &Window, io_gateway: &IoGateway) -> Result<(), AppError> {
		let Some(path) = self.path.clone() else {
			warn!("save requested for a buffer without a file name");
			return Ok(());
		};
		let mut bytes = Vec::new();
		window.buffer().write_to(&mut bytes).map_err(|source| AppError::Buffer { source })?;
		io_gateway
			.enqueue_save(path, window.revision(), bytes)
			.map_err(|source| AppError::IoGateway { source })
	}

	/// An absent file opens as an empty buffer; any other read failure is fatal.
	fn load_completed(&self, window: &mut Window, path: PathBuf, result: io::Result<Vec<u8>>) -> Result<(), AppError> {
		let buffer = match result {
			Ok(bytes) => {
				info!(path = %path.display(), bytes = bytes.len(), "file opened");
				TextBuffer::load(Some(bytes.as_slice()), self.line_slots, self.line_bytes)
			}
			Err(err) if err.kind() == ErrorKind::NotFound => {
				info!(path = %path.display(), "file does not exist yet, starting empty");
				TextBuffer::new(self.line_slots, self.line_bytes)
			}
			Err(source) => return Err(AppError::Load { path, source }),
		}
		.map_err(|source| AppError::Buffer { source })?;
		window.replace_buffer(buffer);
		Ok(())
	}
}

fn apply_editor_action(window: &mut Window, action: EditorAction) -> Result<(), AppError> {
	let result = match action {
		EditorAction::InsertChar(ch) => window.insert_char(ch),
		EditorAction::NewLine => window.new_line(),
		EditorAction::Backspace => window.backspace(),
		EditorAction::MoveUp => {
			window.move_up();
			Ok(())
		}
		EditorAction::MoveDown => {
			window.move_down();
			Ok(())
		}
		EditorAction::MoveLeft => {
			window.move_left();
			Ok(())
		}
		EditorAction::MoveRight => {
			window.move_right();
			Ok(())
		}
	};
	result.map_err(|source| AppError::Buffer { source })
}
