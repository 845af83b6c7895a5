use std::io::{BufRead, Write};

use tracing::debug;

use super::{BufferError, DEFAULT_LINE_GAP, GapBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
	pub row: usize,
	pub col: usize,
}

/// An ordered table of lines plus the edit cursor.
///
/// `cursor.col` is a byte offset into the current line. Moving the cursor only records the new
/// position; the line's gap is relocated lazily by the next edit.
#[derive(Debug)]
pub struct TextBuffer {
	lines:     Vec<GapBuffer>,
	cursor:    Cursor,
	gap_dirty: bool,
}

impl TextBuffer {
	/// Creates a buffer with `line_slots` reserved table slots and a single empty line of
	/// `line_bytes` capacity.
	pub fn new(line_slots: usize, line_bytes: usize) -> Result<Self, BufferError> {
		let mut lines = line_table(line_slots)?;
		lines.push(GapBuffer::with_capacity(line_bytes)?);
		Ok(Self { lines, cursor: Cursor::default(), gap_dirty: false })
	}

	/// Builds a buffer from newline-delimited text, one line per input row with the newline
	/// stripped. `None` or an empty source yields the same single empty line as [`TextBuffer::new`].
	pub fn load<R: BufRead>(
		source: Option<R>,
		line_slots: usize,
		line_bytes: usize,
	) -> Result<Self, BufferError> {
		let Some(mut reader) = source else {
			return Self::new(line_slots, line_bytes);
		};

		let mut lines = line_table(line_slots)?;
		let mut raw = Vec::new();
		loop {
			raw.clear();
			let read = reader.read_until(b'\n', &mut raw).map_err(|source| BufferError::Read { source })?;
			if read == 0 {
				break;
			}
			if raw.last() == Some(&b'\n') {
				raw.pop();
			}
			let capacity = raw.len().saturating_mul(2).max(DEFAULT_LINE_GAP);
			let line = GapBuffer::from_bytes(&raw, capacity - raw.len())?;
			reserve_line_slot(&mut lines)?;
			lines.push(line);
		}

		if lines.is_empty() {
			lines.push(GapBuffer::with_capacity(line_bytes)?);
		}
		debug!(lines = lines.len(), "buffer loaded");
		Ok(Self { lines, cursor: Cursor::default(), gap_dirty: false })
	}

	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	/// Index of the last line.
	pub fn last_line(&self) -> usize {
		self.lines.len() - 1
	}

	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	pub fn line(&self, row: usize) -> Option<&GapBuffer> {
		self.lines.get(row)
	}

	pub(crate) fn line_mut(&mut self, row: usize) -> Option<&mut GapBuffer> {
		self.lines.get_mut(row)
	}

	pub fn lines(&self) -> impl Iterator<Item = &GapBuffer> {
		self.lines.iter()
	}

	/// Length in bytes of line `row`.
	pub fn line_len(&self, row: usize) -> Option<usize> {
		self.lines.get(row).map(GapBuffer::len)
	}

	/// Copy of line `row`.
	pub fn get_line(&self, row: usize) -> Result<String, BufferError> {
		self.lines.get(row).map(GapBuffer::text).ok_or(BufferError::LineNotFound { row })
	}

	/// Places the cursor at the closest valid position to (`row`, `col`).
	pub fn move_cursor(&mut self, row: usize, col: usize) {
		let row = row.min(self.last_line());
		let col = col.min(self.lines[row].len());
		if row != self.cursor.row || col != self.cursor.col {
			self.gap_dirty = true;
		}
		self.cursor = Cursor { row, col };
	}

	pub fn move_up(&mut self) {
		let Cursor { row, col } = self.cursor;
		self.move_cursor(row.saturating_sub(1), col);
	}

	pub fn move_down(&mut self) {
		let Cursor { row, col } = self.cursor;
		self.move_cursor(row + 1, col);
	}

	pub fn move_left(&mut self) {
		let Cursor { row, col } = self.cursor;
		self.move_cursor(row, col.saturating_sub(1));
	}

	pub fn move_right(&mut self) {
		let Cursor { row, col } = self.cursor;
		self.move_cursor(row, col + 1);
	}

	/// Inserts `ch` at the cursor and advances the cursor past it.
	pub fn insert_char(&mut self, ch: u8) -> Result<(), BufferError> {
		self.sync_gap()?;
		let line = &mut self.lines[self.cursor.row];
		line.insert_char(ch)?;
		self.cursor.col = line.gap_position();
		Ok(())
	}

	/// Deletes the character left of the cursor. Does nothing at column 0.
	pub fn backspace(&mut self) -> Result<(), BufferError> {
		self.sync_gap()?;
		let line = &mut self.lines[self.cursor.row];
		line.backspace();
		self.cursor.col = line.gap_position();
		Ok(())
	}

	/// Splits the current line at the cursor. The text after the cursor becomes a new line directly
	/// below, every later line shifts down by one, and the cursor moves to the start of the new line.
	/// The table slot is reserved before the line is cut, so a failed allocation leaves the text as
	/// it was.
	pub fn new_line(&mut self) -> Result<(), BufferError> {
		self.sync_gap()?;
		let row = self.cursor.row;
		reserve_line_slot(&mut self.lines)?;
		let tail = self.lines[row].split()?;
		self.lines.insert(row + 1, tail);
		debug!(row, lines = self.lines.len(), "line split");

		self.cursor = Cursor { row: row + 1, col: 0 };
		self.gap_dirty = false;
		Ok(())
	}

	/// Writes every line followed by a newline.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), BufferError> {
		for (row, line) in self.lines.iter().enumerate() {
			let (front, back) = line.as_slices();
			writer
				.write_all(front)
				.and_then(|()| writer.write_all(back))
				.and_then(|()| writer.write_all(b"\n"))
				.map_err(|source| BufferError::Write { row, source })?;
		}
		writer.flush().map_err(|source| BufferError::Write { row: self.last_line(), source })
	}

	fn sync_gap(&mut self) -> Result<(), BufferError> {
		if self.gap_dirty {
			self.lines[self.cursor.row].move_gap(self.cursor.col)?;
			self.gap_dirty = false;
		}
		Ok(())
	}
}

fn line_table(slots: usize) -> Result<Vec<GapBuffer>, BufferError> {
	let slots = slots.max(1);
	let mut lines = Vec::new();
	lines.try_reserve_exact(slots).map_err(|source| BufferError::OutOfMemory {
		requested: slots.saturating_mul(size_of::<GapBuffer>()),
		source,
	})?;
	Ok(lines)
}

/// Doubles the line table when it is full.
fn reserve_line_slot(lines: &mut Vec<GapBuffer>) -> Result<(), BufferError> {
	if lines.len() < lines.capacity() {
		return Ok(());
	}
	let grown = lines.capacity().max(1);
	lines.try_reserve_exact(grown).map_err(|source| BufferError::OutOfMemory {
		requested: grown.saturating_mul(size_of::<GapBuffer>()),
		source,
	})?;
	debug!(slots = lines.capacity(), "line table grown");
	Ok(())
}
