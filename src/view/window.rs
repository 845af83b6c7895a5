use tracing::trace;

use super::wrap::{self, ScreenPosition};
use super::{ScreenError, StatusLine, VirtualScreen};
use crate::buffer::{BufferError, Cursor, TextBuffer, display_column, render_line};
use crate::config::{EditorConfig, StatusConfig};

/// How much of the window's display cache is stale.
///
/// Ordered from least to most work. `CascadingRender` becomes `FullRender` at the first modified
/// line, since every line below it may have shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderState {
	Rendered,
	PartialRender,
	CascadingRender,
	FullRender,
}

impl RenderState {
	/// Combines a pending state with a new request; never lowers the pending one.
	pub fn request(self, other: Self) -> Self {
		self.max(other)
	}

	fn on_modified_line(self) -> Self {
		match self {
			Self::CascadingRender => Self::FullRender,
			state => state,
		}
	}
}

/// A text buffer bound to the screen that shows it.
///
/// The window keeps a tab-expanded copy of every line and re-renders only what the pending
/// [`RenderState`] says is stale. Its visible range is `start_line..=end_line`.
#[derive(Debug)]
pub struct Window {
	buffer:       TextBuffer,
	screen:       VirtualScreen,
	render_state: RenderState,
	rendered:     Vec<Vec<u8>>,
	tab_size:     usize,
	start_line:   usize,
	end_line:     usize,
	title:        String,
	status:       StatusConfig,
	revision:     u64,
	saved:        u64,
}

impl Window {
	pub fn new(buffer: TextBuffer, screen: VirtualScreen, title: impl Into<String>, config: &EditorConfig) -> Self {
		let mut window = Self {
			buffer,
			screen,
			render_state: RenderState::FullRender,
			rendered: Vec::new(),
			tab_size: config.tab_size,
			start_line: 0,
			end_line: 0,
			title: title.into(),
			status: config.status.clone(),
			revision: 0,
			saved: 0,
		};
		window.reset();
		window
	}

	pub fn buffer(&self) -> &TextBuffer {
		&self.buffer
	}

	pub fn screen(&self) -> &VirtualScreen {
		&self.screen
	}

	pub fn render_state(&self) -> RenderState {
		self.render_state
	}

	/// First and last line currently in view.
	pub fn view_range(&self) -> (usize, usize) {
		(self.start_line, self.end_line)
	}

	/// Display form of line `row` as of the last render.
	pub fn rendered_line(&self, row: usize) -> Option<&[u8]> {
		self.rendered.get(row).map(Vec::as_slice)
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	/// Counter bumped by every edit.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Whether there are edits newer than the last save.
	pub fn is_modified(&self) -> bool {
		self.revision != self.saved
	}

	/// Records that the buffer as of `revision` reached disk.
	pub fn mark_saved(&mut self, revision: u64) {
		self.saved = revision;
	}

	pub fn insert_char(&mut self, ch: u8) -> Result<(), BufferError> {
		self.buffer.insert_char(ch)?;
		self.edited(RenderState::PartialRender);
		Ok(())
	}

	pub fn backspace(&mut self) -> Result<(), BufferError> {
		let before = self.buffer.cursor();
		self.buffer.backspace()?;
		if self.buffer.cursor() != before {
			self.edited(RenderState::PartialRender);
		}
		Ok(())
	}

	pub fn new_line(&mut self) -> Result<(), BufferError> {
		self.buffer.new_line()?;
		self.edited(RenderState::CascadingRender);
		Ok(())
	}

	pub fn move_cursor(&mut self, row: usize, col: usize) {
		self.buffer.move_cursor(row, col);
	}

	pub fn move_up(&mut self) {
		self.buffer.move_up();
	}

	pub fn move_down(&mut self) {
		self.buffer.move_down();
	}

	pub fn move_left(&mut self) {
		self.buffer.move_left();
	}

	pub fn move_right(&mut self) {
		self.buffer.move_right();
	}

	pub fn resize(&mut self, width: u16, height: u16) {
		self.screen.resize(width, height);
		self.render_state = RenderState::FullRender;
	}

	/// Swaps in a freshly loaded buffer and resets the view to its top.
	pub fn replace_buffer(&mut self, buffer: TextBuffer) {
		self.buffer = buffer;
		self.rendered.clear();
		self.revision = 0;
		self.saved = 0;
		self.reset();
	}

	/// Regenerates the display cache for the lines the pending render state marks stale.
	pub fn render_text_buffer(&mut self) {
		if self.render_state == RenderState::Rendered {
			return;
		}

		let line_count = self.buffer.line_count();
		self.rendered.resize_with(line_count, Vec::new);

		let mut state = self.render_state;
		let mut regenerated = 0;
		for row in 0..line_count {
			let Some(line) = self.buffer.line_mut(row) else {
				break;
			};
			if line.is_modified() {
				state = state.on_modified_line();
			}
			if state == RenderState::FullRender || line.is_modified() {
				self.rendered[row] = render_line(line, self.tab_size);
				line.clear_modified();
				regenerated += 1;
			}
		}

		trace!(pending = ?self.render_state, regenerated, "window rendered");
		self.render_state = RenderState::Rendered;
	}

	/// Adjusts `start_line..=end_line` so the cursor line is in view.
	pub fn move_cursor_in_view(&mut self) {
		let width = self.screen.width();
		let text_rows = self.screen.text_rows();
		let line_count = self.rendered.len();
		let rendered = &self.rendered;
		let rendered_len = |row: usize| rendered.get(row).map_or(0, Vec::len);

		self.start_line = self.start_line.min(line_count.saturating_sub(1));
		self.end_line = wrap::visible_span(self.start_line, line_count, text_rows, width, rendered_len).last;

		let cursor_row = self.buffer.cursor().row;
		if cursor_row < self.start_line || cursor_row > self.end_line {
			self.start_line =
				wrap::scroll_anchor_for_cursor(self.start_line, cursor_row, line_count, text_rows, width, rendered_len);
			self.end_line = wrap::visible_span(self.start_line, line_count, text_rows, width, rendered_len).last;
		}
	}

	/// Cursor to (0, 0), view to the top, everything re-rendered.
	pub fn reset(&mut self) {
		self.buffer.move_cursor(0, 0);
		self.render_state = RenderState::FullRender;
		self.render_text_buffer();

		self.start_line = 0;
		let rendered = &self.rendered;
		self.end_line = wrap::visible_span(
			0,
			rendered.len(),
			self.screen.text_rows(),
			self.screen.width(),
			|row: usize| rendered.get(row).map_or(0, Vec::len),
		)
		.last;
	}

	/// Screen cell of the cursor, measured in display columns.
	pub fn cursor_screen_position(&self) -> ScreenPosition {
		let Cursor { row, col } = self.buffer.cursor();
		let display_col = self.buffer.line(row).map_or(0, |line| display_column(line, col, self.tab_size));
		wrap::cursor_screen_position(self.start_line, Cursor { row, col: display_col }, self.screen.width(), |row| {
			self.rendered.get(row).map_or(0, Vec::len)
		})
	}

	/// Brings the cache and view up to date and composes one frame.
	pub fn draw(&mut self) -> Result<&[u8], ScreenError> {
		self.render_text_buffer();
		self.move_cursor_in_view();
		let position = self.cursor_screen_position();
		let cursor = self.buffer.cursor();

		let visible = self
			.rendered
			.get(self.start_line..)
			.ok_or(ScreenError::LineNotFound { row: self.start_line })?;
		let status = StatusLine {
			file_name:     &self.title,
			row:           cursor.row + 1,
			col:           cursor.col + 1,
			modified:      self.revision != self.saved,
			modified_text: &self.status.modified,
			commands:      &self.status.commands,
		};

		self.screen.set_scroll_anchor(self.start_line);
		self.screen.begin_frame()?;
		self.screen.write_rows(visible)?;
		self.screen.render_status_line(&status)?;
		self.screen.finish_frame(position)
	}

	fn edited(&mut self, render: RenderState) {
		self.revision += 1;
		self.render_state = self.render_state.request(render);
	}
}
