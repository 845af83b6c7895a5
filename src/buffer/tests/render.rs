use crate::buffer::{GapBuffer, display_column, render_line};

#[test]
fn render_line_should_expand_tabs() {
	let line = GapBuffer::from_text("\tx\ty", 4).expect("allocation succeeds");
	assert_eq!(render_line(&line, 4), b"    x    y");
	assert_eq!(render_line(&line, 2), b"  x  y");
}

#[test]
fn render_line_should_copy_plain_text() {
	let mut line = GapBuffer::from_text("plain", 4).expect("allocation succeeds");
	line.move_gap(2).expect("move succeeds");
	assert_eq!(render_line(&line, 8), b"plain");
}

#[test]
fn display_column_should_count_tabs_as_tab_size() {
	let line = GapBuffer::from_text("a\tb", 4).expect("allocation succeeds");
	assert_eq!(display_column(&line, 0, 4), 0);
	assert_eq!(display_column(&line, 1, 4), 1);
	assert_eq!(display_column(&line, 2, 4), 5);
	assert_eq!(display_column(&line, 3, 4), 6);
	assert_eq!(display_column(&line, 10, 4), 6);
}
