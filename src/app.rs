use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use crossterm::event;
use thiserror::Error;
use tracing::{error, info, trace, warn};

use crate::action::AppAction;
use crate::action_handler::ActionHandler;
use crate::buffer::{BufferError, TextBuffer};
use crate::config::EditorConfig;
use crate::input::InputHandler;
use crate::io_gateway::{IoGateway, IoGatewayError};
use crate::terminal_session::{TerminalSession, TerminalSessionError};
use crate::view::{ScreenError, VirtualScreen, Window};

/// Title shown for a buffer that has no file behind it.
pub const UNTITLED: &str = "Empty Buffer";

#[derive(Debug, Error)]
pub enum AppError {
	#[error("terminal session failed")]
	Terminal {
		#[source]
		source: TerminalSessionError,
	},
	#[error("compose frame failed")]
	Screen {
		#[source]
		source: ScreenError,
	},
	#[error("buffer operation failed")]
	Buffer {
		#[source]
		source: BufferError,
	},
	#[error("open {} failed", path.display())]
	Load {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("file io unavailable")]
	IoGateway {
		#[source]
		source: IoGatewayError,
	},
	#[error("event bus disconnected")]
	EventBusDisconnected,
}

pub struct App {
	window:         Window,
	action_handler: ActionHandler,
	io_gateway:     IoGateway,
	path:           Option<PathBuf>,
	event_tx:       flume::Sender<AppAction>,
	event_rx:       flume::Receiver<AppAction>,
}

impl App {
	/// Sets up an empty window titled after `path`. The file itself is read when [`App::run`]
	/// starts.
	pub fn new(config: EditorConfig, path: Option<PathBuf>) -> Result<Self, AppError> {
		let buffer = TextBuffer::new(config.initial_lines, config.initial_line_bytes)
			.map_err(|source| AppError::Buffer { source })?;
		let window = Window::new(buffer, VirtualScreen::new(0, 0), window_title(path.as_deref()), &config);

		let (event_tx, event_rx) = flume::bounded(1024);
		let io_gateway = IoGateway::start(event_tx.clone());

		Ok(Self {
			window,
			action_handler: ActionHandler::new(path.clone(), &config),
			io_gateway,
			path,
			event_tx,
			event_rx,
		})
	}

	pub fn run(mut self) -> Result<(), AppError> {
		let mut session =
			TerminalSession::enter(self.window.title()).map_err(|source| AppError::Terminal { source })?;
		let (width, height) = session.size().map_err(|source| AppError::Terminal { source })?;
		self.window.resize(width, height);

		// Keys typed before the file lands would be lost when the buffer is replaced, so the input
		// pump only starts once the load has been applied.
		if let Some(path) = self.path.clone() {
			self.io_gateway.enqueue_load(path).map_err(|source| AppError::IoGateway { source })?;
			let action = self.next_action()?;
			if self.action_handler.apply(&mut self.window, &self.io_gateway, action)?.is_break() {
				info!("quit before first frame");
				return Ok(());
			}
		}
		self.start_input_pump();

		loop {
			match self.window.draw() {
				Ok(frame) => session.write_frame(frame).map_err(|source| AppError::Terminal { source })?,
				Err(ScreenError::Layout { width, required }) => {
					warn!(width, required, "terminal too narrow for status line, frame skipped");
				}
				Err(source) => return Err(AppError::Screen { source }),
			}
			trace!("redraw");

			let action = self.next_action()?;
			if self.action_handler.apply(&mut self.window, &self.io_gateway, action)?.is_break() {
				break;
			}
		}

		info!("quit");
		Ok(())
	}

	fn next_action(&self) -> Result<AppAction, AppError> {
		self.event_rx.recv().map_err(|err| {
			error!("event bus disconnected while waiting for next action: {err}");
			AppError::EventBusDisconnected
		})
	}

	fn start_input_pump(&self) {
		let event_tx = self.event_tx.clone();
		let input_handler = InputHandler::new();
		thread::spawn(move || {
			loop {
				let evt = match event::read() {
					Ok(evt) => evt,
					Err(err) => {
						error!("input pump stopped: failed to read terminal event: {err}");
						break;
					}
				};
				let Some(action) = input_handler.action(&evt) else {
					continue;
				};
				if let Err(err) = event_tx.send(action) {
					error!("input pump stopped: failed to send action to event bus: {err}");
					break;
				}
			}
		});
	}
}

/// File name shown in the status line and terminal title.
pub fn window_title(path: Option<&Path>) -> String {
	path.map_or_else(
		|| UNTITLED.to_string(),
		|path| path.file_name().unwrap_or(path.as_os_str()).to_string_lossy().into_owned(),
	)
}
