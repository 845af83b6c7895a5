//! Line-oriented text storage.
//!
//! Every logical line lives in its own [`GapBuffer`]; a [`TextBuffer`] owns the
//! ordered line table together with the single edit cursor. Text is treated as
//! single-byte characters throughout: columns are byte offsets.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

mod gap;
mod render;
mod text;

pub use gap::GapBuffer;
pub use render::render_line;
pub(crate) use render::display_column;
pub use text::{Cursor, TextBuffer};

/// Gap handed to a line when no other size is known.
pub const DEFAULT_LINE_GAP: usize = 200;

/// Slots reserved in the line table of a fresh buffer.
pub const DEFAULT_LINE_SLOTS: usize = 1000;

#[derive(Debug, Error)]
pub enum BufferError {
	#[error("allocating {requested} bytes of buffer storage failed")]
	OutOfMemory {
		requested: usize,
		#[source]
		source:    TryReserveError,
	},
	#[error("line {row} does not exist")]
	LineNotFound { row: usize },
	#[error("reading buffer source failed")]
	Read {
		#[source]
		source: io::Error,
	},
	#[error("writing line {row} failed")]
	Write {
		row:    usize,
		#[source]
		source: io::Error,
	},
}

/// Allocates a zero-filled byte vector, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc(capacity: usize) -> Result<Vec<u8>, BufferError> {
	let mut storage = Vec::new();
	storage
		.try_reserve_exact(capacity)
		.map_err(|source| BufferError::OutOfMemory { requested: capacity, source })?;
	storage.resize(capacity, 0);
	Ok(storage)
}

#[cfg(test)]
mod tests;
