use std::io::{self, Write};

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalSessionError {
	#[error("enable raw mode failed")]
	EnableRawMode {
		#[source]
		source: io::Error,
	},
	#[error("enter alternate screen failed")]
	EnterAlternateScreen {
		#[source]
		source: io::Error,
	},
	#[error("query terminal size failed")]
	Size {
		#[source]
		source: io::Error,
	},
	#[error("write frame failed")]
	WriteFrame {
		#[source]
		source: io::Error,
	},
}

/// Restores cooked mode and the main screen however the session ends, including on error paths.
struct TerminalModeGuard;

impl Drop for TerminalModeGuard {
	fn drop(&mut self) {
		let _ = disable_raw_mode();
		let mut stdout = io::stdout();
		let _ = execute!(stdout, Show, LeaveAlternateScreen);
	}
}

pub(crate) struct TerminalSession {
	stdout:      io::Stdout,
	_mode_guard: TerminalModeGuard,
}

impl TerminalSession {
	pub(crate) fn enter(title: &str) -> Result<Self, TerminalSessionError> {
		enable_raw_mode().map_err(|source| TerminalSessionError::EnableRawMode { source })?;
		let mode_guard = TerminalModeGuard;
		let mut stdout = io::stdout();
		execute!(stdout, EnterAlternateScreen, SetTitle(title))
			.map_err(|source| TerminalSessionError::EnterAlternateScreen { source })?;
		Ok(Self { stdout, _mode_guard: mode_guard })
	}

	/// Current viewport as `(width, height)`.
	pub(crate) fn size(&self) -> Result<(u16, u16), TerminalSessionError> {
		terminal::size().map_err(|source| TerminalSessionError::Size { source })
	}

	/// Writes one composed frame verbatim.
	pub(crate) fn write_frame(&mut self, frame: &[u8]) -> Result<(), TerminalSessionError> {
		self.stdout
			.write_all(frame)
			.and_then(|()| self.stdout.flush())
			.map_err(|source| TerminalSessionError::WriteFrame { source })
	}
}
