//! Line-wrap arithmetic shared by scrolling and cursor placement.
//!
//! Every function takes the per-line length as a closure so the same accounting runs over raw
//! byte lengths ([`super::VirtualScreen`]) and tab-expanded lengths ([`super::Window`]).

use crate::buffer::Cursor;

/// 1-indexed terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPosition {
	pub row: usize,
	pub col: usize,
}

impl Default for ScreenPosition {
	fn default() -> Self {
		Self { row: 1, col: 1 }
	}
}

/// Screen rows a line of `line_len` cells occupies at `width` columns. An empty line still takes a row.
pub fn required_screen_rows(line_len: usize, width: usize) -> usize {
	if line_len == 0 { 1 } else { line_len.div_ceil(width.max(1)) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VisibleSpan {
	/// Last line drawn in full.
	pub last:      usize,
	pub rows_used: usize,
}

/// Walks forward from `anchor` while whole lines still fit in `text_rows`.
///
/// A first line taller than the viewport counts as visible and fills it.
pub(crate) fn visible_span(
	anchor: usize,
	line_count: usize,
	text_rows: usize,
	width: usize,
	line_len: impl Fn(usize) -> usize,
) -> VisibleSpan {
	let mut span = VisibleSpan { last: anchor, rows_used: 0 };
	for row in anchor..line_count {
		let rows = required_screen_rows(line_len(row), width);
		if span.rows_used + rows > text_rows {
			if row == anchor {
				span.rows_used = text_rows;
			}
			break;
		}
		span.rows_used += rows;
		span.last = row;
	}
	span
}

/// New scroll anchor keeping `cursor_row` on screen.
///
/// A cursor above the view snaps the anchor straight to it. A cursor below the last visible line
/// advances the anchor one line at a time, releasing each line's rows, until the rows between the
/// old view and the cursor fit. The cursor line always ends up inside the returned view.
pub fn scroll_anchor_for_cursor(
	anchor: usize,
	cursor_row: usize,
	line_count: usize,
	text_rows: usize,
	width: usize,
	line_len: impl Fn(usize) -> usize,
) -> usize {
	if cursor_row < anchor {
		return cursor_row;
	}

	let span = visible_span(anchor, line_count, text_rows, width, &line_len);
	if cursor_row <= span.last {
		return anchor;
	}

	let rows_below: usize =
		(span.last + 1..=cursor_row).map(|row| required_screen_rows(line_len(row), width)).sum();
	let mut rows_needed = rows_below.saturating_sub(text_rows.saturating_sub(span.rows_used));

	let mut anchor = anchor;
	while rows_needed > 0 && anchor < cursor_row {
		rows_needed = rows_needed.saturating_sub(required_screen_rows(line_len(anchor), width));
		anchor += 1;
	}
	// A released line taller than the viewport frees fewer rows than it costs, so the count above
	// can stop short of the cursor.
	while anchor < cursor_row && visible_span(anchor, line_count, text_rows, width, &line_len).last < cursor_row {
		anchor += 1;
	}
	anchor
}

/// Where `cursor` lands on screen when drawing starts at `anchor`.
///
/// Rows of every line between the anchor and the cursor line are summed, then the cursor's own
/// wrap (`col / width`) is added.
pub fn cursor_screen_position(
	anchor: usize,
	cursor: Cursor,
	width: usize,
	line_len: impl Fn(usize) -> usize,
) -> ScreenPosition {
	let width = width.max(1);
	let rows_above: usize =
		(anchor..cursor.row).map(|row| required_screen_rows(line_len(row), width)).sum();
	ScreenPosition { row: 1 + rows_above + cursor.col / width, col: cursor.col % width + 1 }
}
