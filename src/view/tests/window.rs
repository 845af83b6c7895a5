use super::common::{FRAME_START, buffer_with_text, numbered_lines, window_with};
use crate::buffer::Cursor;
use crate::view::{RenderState, ScreenError, ScreenPosition};

const COMMANDS: &str = "Ctrl+Q-quit Ctrl+S-Save";

fn rendered(window: &crate::view::Window) -> Vec<String> {
	(0..window.buffer().line_count())
		.map(|row| String::from_utf8_lossy(window.rendered_line(row).expect("row rendered")).into_owned())
		.collect()
}

#[test]
fn render_requests_should_only_raise_pending_state() {
	use RenderState::*;

	assert_eq!(Rendered.request(PartialRender), PartialRender);
	assert_eq!(PartialRender.request(CascadingRender), CascadingRender);
	assert_eq!(CascadingRender.request(PartialRender), CascadingRender);
	assert_eq!(FullRender.request(Rendered), FullRender);
}

#[test]
fn new_window_should_be_rendered_at_top() {
	let window = window_with(&numbered_lines(10), 60, 4);
	assert_eq!(window.render_state(), RenderState::Rendered);
	assert_eq!(window.view_range(), (0, 2));
	assert_eq!(window.buffer().cursor(), Cursor { row: 0, col: 0 });
	assert_eq!(window.rendered_line(9), Some(&b"line 9"[..]));
	assert!(!window.is_modified());
}

#[test]
fn rendered_lines_should_expand_tabs() {
	let window = window_with("\tx\n", 60, 4);
	assert_eq!(window.rendered_line(0), Some(&b"    x"[..]));
}

#[test]
fn insert_should_request_partial_render() {
	let mut window = window_with("ac\n", 60, 4);
	window.move_cursor(0, 1);
	window.insert_char(b'b').expect("insert succeeds");
	assert_eq!(window.render_state(), RenderState::PartialRender);

	window.render_text_buffer();
	assert_eq!(window.render_state(), RenderState::Rendered);
	assert_eq!(window.rendered_line(0), Some(&b"abc"[..]));
	assert!(!window.buffer().line(0).expect("line exists").is_modified());
}

#[test]
fn new_line_should_cascade_into_following_lines() {
	let mut window = window_with("ab\ncd\nef\n", 60, 5);
	window.move_cursor(0, 1);
	window.insert_char(b'X').expect("insert succeeds");
	window.new_line().expect("split succeeds");
	assert_eq!(window.render_state(), RenderState::CascadingRender);

	window.render_text_buffer();
	assert_eq!(rendered(&window), ["aX", "b", "cd", "ef"]);
}

#[test]
fn backspace_at_line_start_should_not_mark_window_dirty() {
	let mut window = window_with("ab\ncd\n", 60, 4);
	window.move_cursor(1, 0);
	window.backspace().expect("backspace succeeds");
	assert_eq!(window.render_state(), RenderState::Rendered);
	assert_eq!(window.revision(), 0);
	assert!(!window.is_modified());
}

#[test]
fn saving_should_only_clear_edits_up_to_saved_revision() {
	let mut window = window_with("", 60, 4);
	window.insert_char(b'a').expect("insert succeeds");
	let saving = window.revision();
	assert!(window.is_modified());

	window.insert_char(b'b').expect("insert succeeds");
	window.mark_saved(saving);
	assert!(window.is_modified());

	window.mark_saved(window.revision());
	assert!(!window.is_modified());
}

#[test]
fn draw_should_compose_full_frame() {
	let mut window = window_with("hello\n", 60, 5);
	let frame = window.draw().expect("frame composes").to_vec();

	let mut expected = FRAME_START.to_vec();
	expected.extend_from_slice(b"hello\r\n\r\n\r\n\r\n");
	expected.extend_from_slice(format!("\x1b[7mnotes.txt | 1,1 {}{COMMANDS}\x1b[0m", " ".repeat(21)).as_bytes());
	expected.extend_from_slice(b"\x1b[1;1H\x1b[?25h");
	assert_eq!(frame, expected);
}

#[test]
fn draw_should_show_modified_marker_after_edit() {
	let mut window = window_with("hello\n", 60, 5);
	window.insert_char(b'>').expect("insert succeeds");
	let frame = String::from_utf8(window.draw().expect("frame composes").to_vec()).expect("frame is utf-8");
	assert!(frame.contains(&format!("changed{COMMANDS}")));
	assert!(frame.contains(">hello\r\n"));
	assert!(frame.contains(" | 1,2 "));
}

#[test]
fn draw_should_place_cursor_in_display_columns() {
	let mut window = window_with("\tx\n", 60, 4);
	window.move_cursor(0, 1);
	window.draw().expect("frame composes");
	assert_eq!(window.screen().cursor_position(), ScreenPosition { row: 1, col: 5 });
}

#[test]
fn draw_should_scroll_to_cursor() {
	let mut window = window_with(&numbered_lines(10), 60, 4);

	window.move_cursor(6, 0);
	window.draw().expect("frame composes");
	assert_eq!(window.view_range(), (4, 6));
	assert_eq!(window.screen().scroll_anchor(), 4);
	assert_eq!(window.screen().cursor_position(), ScreenPosition { row: 3, col: 1 });

	window.move_cursor(1, 0);
	window.draw().expect("frame composes");
	assert_eq!(window.view_range(), (1, 3));
	assert_eq!(window.screen().cursor_position(), ScreenPosition { row: 1, col: 1 });
}

#[test]
fn draw_on_narrow_screen_should_fail_layout() {
	let mut window = window_with("hello\n", 20, 5);
	let err = window.draw().expect_err("status line does not fit");
	assert!(matches!(err, ScreenError::Layout { width: 20, .. }));
}

#[test]
fn resize_should_force_full_render() {
	let mut window = window_with("hello\n", 20, 5);
	window.resize(60, 5);
	assert_eq!(window.render_state(), RenderState::FullRender);
	assert_eq!(window.screen().width(), 60);
	window.draw().expect("frame composes");
	assert_eq!(window.render_state(), RenderState::Rendered);
}

#[test]
fn replace_buffer_should_reset_view_and_revisions() {
	let mut window = window_with(&numbered_lines(10), 60, 4);
	window.move_cursor(8, 0);
	window.insert_char(b'x').expect("insert succeeds");
	window.draw().expect("frame composes");

	window.replace_buffer(buffer_with_text("fresh\n"));
	assert_eq!(window.buffer().cursor(), Cursor { row: 0, col: 0 });
	assert_eq!(window.view_range(), (0, 0));
	assert_eq!(window.revision(), 0);
	assert!(!window.is_modified());
	assert_eq!(rendered(&window), ["fresh"]);
}

#[test]
fn view_should_reach_cursor_below_line_taller_than_screen() {
	let text = format!("{}\n{}\n{}\n", "a".repeat(221), "b".repeat(122), "c".repeat(91));
	let mut window = window_with(&text, 42, 5);

	window.move_cursor(2, 84);
	window.move_cursor_in_view();
	assert_eq!(window.view_range(), (2, 2));

	let position = window.cursor_screen_position();
	assert!(position.row <= window.screen().text_rows(), "cursor lands on screen row {}", position.row);
	assert_eq!(position, ScreenPosition { row: 3, col: 1 });
}
