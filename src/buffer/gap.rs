use tracing::trace;

use super::{BufferError, try_alloc};

/// Smallest capacity a line grows to, so that an empty zero-capacity line can still accept input.
const MIN_CAPACITY: usize = 8;

/// Storage for a single line.
///
/// The backing store is laid out as
///
/// ```text
///  [ text before gap | gap (unused) | text after gap ]
///    0..gap_start      ..+gap_len     ..capacity
/// ```
///
/// and the logical line is the concatenation of the two text segments.
#[derive(Debug)]
pub struct GapBuffer {
	storage:   Vec<u8>,
	gap_start: usize,
	gap_len:   usize,
	modified:  bool,
}

impl GapBuffer {
	/// Creates an empty line whose gap spans all `capacity` bytes.
	pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
		Ok(Self { storage: try_alloc(capacity)?, gap_start: 0, gap_len: capacity, modified: false })
	}

	/// Creates a line holding `text`, followed by a gap of `extra_gap` bytes so that appends are cheap.
	pub fn from_bytes(text: &[u8], extra_gap: usize) -> Result<Self, BufferError> {
		if text.is_empty() {
			return Self::with_capacity(extra_gap);
		}
		let capacity = text.len().saturating_add(extra_gap);
		let mut storage = try_alloc(capacity)?;
		storage[..text.len()].copy_from_slice(text);
		Ok(Self { storage, gap_start: text.len(), gap_len: extra_gap, modified: false })
	}

	pub fn from_text(text: &str, extra_gap: usize) -> Result<Self, BufferError> {
		Self::from_bytes(text.as_bytes(), extra_gap)
	}

	/// Length of the logical line in bytes.
	pub fn len(&self) -> usize {
		self.storage.len() - self.gap_len
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn capacity(&self) -> usize {
		self.storage.len()
	}

	/// Logical offset where the next inserted byte lands.
	pub fn gap_position(&self) -> usize {
		self.gap_start
	}

	pub fn gap_len(&self) -> usize {
		self.gap_len
	}

	/// Whether the line changed since the flag was last cleared.
	pub fn is_modified(&self) -> bool {
		self.modified
	}

	pub fn clear_modified(&mut self) {
		self.modified = false;
	}

	/// The text before and after the gap, in order.
	pub fn as_slices(&self) -> (&[u8], &[u8]) {
		(&self.storage[..self.gap_start], &self.storage[self.gap_start + self.gap_len..])
	}

	pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
		let (front, back) = self.as_slices();
		front.iter().chain(back).copied()
	}

	/// Byte at logical offset `index`, or `None` past the end of the line.
	pub fn char_at(&self, index: usize) -> Option<u8> {
		if index >= self.len() {
			return None;
		}
		if index < self.gap_start {
			Some(self.storage[index])
		} else {
			Some(self.storage[index + self.gap_len])
		}
	}

	/// Fresh copy of the logical line.
	pub fn to_bytes(&self) -> Vec<u8> {
		let (front, back) = self.as_slices();
		let mut out = Vec::with_capacity(front.len() + back.len());
		out.extend_from_slice(front);
		out.extend_from_slice(back);
		out
	}

	/// Fresh copy of the logical line as text. Bytes that are not UTF-8 are replaced.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.to_bytes()).into_owned()
	}

	/// Writes `ch` at the gap. Grows the buffer first when at most one gap byte is left.
	pub fn insert_char(&mut self, ch: u8) -> Result<(), BufferError> {
		if self.gap_len <= 1 {
			let grown = self.capacity().saturating_mul(2).max(MIN_CAPACITY);
			self.relocate(self.gap_start, grown)?;
		}
		self.storage[self.gap_start] = ch;
		self.gap_start += 1;
		self.gap_len -= 1;
		self.modified = true;
		Ok(())
	}

	/// Deletes the byte immediately before the gap. Does nothing at offset 0.
	pub fn backspace(&mut self) {
		if self.gap_start == 0 {
			return;
		}
		self.gap_start -= 1;
		self.gap_len += 1;
		self.modified = true;
	}

	/// Moves the gap to logical offset `target`, clamped to the line length.
	pub fn move_gap(&mut self, target: usize) -> Result<(), BufferError> {
		let target = target.min(self.len());
		if target == self.gap_start {
			return Ok(());
		}
		self.relocate(target, self.capacity())
	}

	/// Splits the line at the gap.
	///
	/// `self` keeps the text before the gap; the returned line has the same capacity and holds the
	/// text after the gap, with its own gap at offset 0.
	pub fn split(&mut self) -> Result<GapBuffer, BufferError> {
		let capacity = self.capacity();
		let tail_start = self.gap_start + self.gap_len;
		let tail_len = capacity - tail_start;

		let mut storage = try_alloc(capacity)?;
		storage[capacity - tail_len..].copy_from_slice(&self.storage[tail_start..]);

		self.gap_len = capacity - self.gap_start;
		self.modified = true;

		Ok(GapBuffer { storage, gap_start: 0, gap_len: capacity - tail_len, modified: true })
	}

	/// Rebuilds the storage with `capacity` bytes and the gap at `gap_at`.
	/// Any capacity beyond the text length goes to the gap.
	fn relocate(&mut self, gap_at: usize, capacity: usize) -> Result<(), BufferError> {
		let len = self.len();
		let capacity = capacity.max(len);
		let gap_len = capacity - len;

		let mut storage = try_alloc(capacity)?;
		self.copy_range(0, gap_at, &mut storage[..gap_at]);
		self.copy_range(gap_at, len, &mut storage[gap_at + gap_len..]);

		trace!(from = self.gap_start, to = gap_at, capacity, "gap relocated");
		self.storage = storage;
		self.gap_start = gap_at;
		self.gap_len = gap_len;
		Ok(())
	}

	/// Copies the logical range `start..end` into `dest`, which must be exactly that long.
	fn copy_range(&self, start: usize, end: usize, dest: &mut [u8]) {
		let (front, back) = self.as_slices();
		let mut written = 0;
		if start < front.len() {
			let segment = &front[start..end.min(front.len())];
			dest[..segment.len()].copy_from_slice(segment);
			written = segment.len();
		}
		if end > front.len() {
			let segment = &back[start.max(front.len()) - front.len()..end - front.len()];
			dest[written..written + segment.len()].copy_from_slice(segment);
		}
	}
}
