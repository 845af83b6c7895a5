use std::fmt;

use crossterm::Command;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use tracing::trace;

use super::wrap::{self, ScreenPosition};
use super::{ScreenError, StatusLine};
use crate::buffer::{GapBuffer, TextBuffer};

/// One frame of terminal output plus the viewport it is composed for.
///
/// The output buffer is rebuilt from scratch on every redraw and handed to the terminal as a
/// single write.
#[derive(Debug)]
pub struct VirtualScreen {
	output:        Vec<u8>,
	width:         usize,
	height:        usize,
	scroll_anchor: usize,
	cursor:        ScreenPosition,
}

impl VirtualScreen {
	pub fn new(width: u16, height: u16) -> Self {
		let (width, height) = (usize::from(width), usize::from(height));
		Self {
			output: Vec::with_capacity(width * height * 2),
			width,
			height,
			scroll_anchor: 0,
			cursor: ScreenPosition::default(),
		}
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	/// Rows available for text; the bottom row belongs to the status line.
	pub fn text_rows(&self) -> usize {
		self.height.saturating_sub(1)
	}

	pub fn resize(&mut self, width: u16, height: u16) {
		self.width = usize::from(width);
		self.height = usize::from(height);
	}

	/// Topmost visible line.
	pub fn scroll_anchor(&self) -> usize {
		self.scroll_anchor
	}

	pub(crate) fn set_scroll_anchor(&mut self, anchor: usize) {
		self.scroll_anchor = anchor;
	}

	/// Cursor cell computed by the last finished frame.
	pub fn cursor_position(&self) -> ScreenPosition {
		self.cursor
	}

	/// Bytes composed so far for the current frame.
	pub fn frame(&self) -> &[u8] {
		&self.output
	}

	pub fn append(&mut self, bytes: &[u8]) {
		self.output.extend_from_slice(bytes);
	}

	/// Appends the ANSI encoding of `command`.
	pub fn queue(&mut self, command: impl Command) -> Result<(), ScreenError> {
		command.write_ansi(&mut AnsiSink(&mut self.output)).map_err(|source| ScreenError::Escape { source })
	}

	/// Empties the output and starts the frame with hide-cursor, clear-screen and cursor-home.
	pub fn begin_frame(&mut self) -> Result<(), ScreenError> {
		self.output.clear();
		self.queue(Hide)?;
		self.queue(Clear(ClearType::All))?;
		self.queue(MoveTo(0, 0))
	}

	/// Moves the scroll anchor so the buffer cursor stays visible.
	pub fn scroll_to_keep_cursor_visible(&mut self, buffer: &TextBuffer) {
		let anchor = wrap::scroll_anchor_for_cursor(
			self.scroll_anchor,
			buffer.cursor().row,
			buffer.line_count(),
			self.text_rows(),
			self.width,
			|row| buffer.line_len(row).unwrap_or(0),
		);
		if anchor != self.scroll_anchor {
			trace!(from = self.scroll_anchor, to = anchor, "scrolled");
		}
		self.scroll_anchor = anchor;
	}

	/// Writes the buffer's lines from the scroll anchor down, wrapping at the screen width.
	pub fn render_visible_lines(&mut self, buffer: &TextBuffer) -> Result<(), ScreenError> {
		if buffer.line(self.scroll_anchor).is_none() {
			return Err(ScreenError::LineNotFound { row: self.scroll_anchor });
		}
		self.write_rows(buffer.lines().skip(self.scroll_anchor).map(GapBuffer::to_bytes))
	}

	/// Writes lines into the text area. Lines wider than the screen are emitted in width-sized
	/// chunks, one row each; unused rows are left blank so the status line lands on the last row.
	pub(crate) fn write_rows<I>(&mut self, lines: I) -> Result<(), ScreenError>
	where
		I: IntoIterator,
		I::Item: AsRef<[u8]>,
	{
		let text_rows = self.text_rows();
		let width = self.width.max(1);
		let mut written = 0;

		for line in lines {
			if written >= text_rows {
				break;
			}
			let line = line.as_ref();
			if line.len() > width {
				for chunk in line.chunks(width) {
					self.append(chunk);
					self.append(b"\r\n");
					self.queue(Clear(ClearType::UntilNewLine))?;
					written += 1;
					if written == text_rows {
						break;
					}
				}
			} else {
				self.append(line);
				self.append(b"\r\n");
				written += 1;
			}
		}

		for _ in written..text_rows {
			self.append(b"\r\n");
		}
		Ok(())
	}

	/// Writes the status row in inverse video.
	pub fn render_status_line(&mut self, status: &StatusLine<'_>) -> Result<(), ScreenError> {
		let line = status.compose(self.width)?;
		self.queue(SetAttribute(Attribute::Reverse))?;
		self.append(line.as_bytes());
		self.queue(SetAttribute(Attribute::Reset))
	}

	/// Places the terminal cursor over the buffer cursor, shows it, and returns the finished frame.
	pub fn end_frame(&mut self, buffer: &TextBuffer) -> Result<&[u8], ScreenError> {
		let position = wrap::cursor_screen_position(
			self.scroll_anchor,
			buffer.cursor(),
			self.width,
			|row| buffer.line_len(row).unwrap_or(0),
		);
		self.finish_frame(position)
	}

	pub(crate) fn finish_frame(&mut self, position: ScreenPosition) -> Result<&[u8], ScreenError> {
		self.cursor = position;
		let column = u16::try_from(position.col.saturating_sub(1)).unwrap_or(u16::MAX);
		let row = u16::try_from(position.row.saturating_sub(1)).unwrap_or(u16::MAX);
		self.queue(MoveTo(column, row))?;
		self.queue(Show)?;
		trace!(bytes = self.output.len(), "frame composed");
		Ok(&self.output)
	}
}

struct AnsiSink<'a>(&'a mut Vec<u8>);

impl fmt::Write for AnsiSink<'_> {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.0.extend_from_slice(s.as_bytes());
		Ok(())
	}
}
