use crate::buffer::GapBuffer;

#[test]
fn with_capacity_should_start_empty_with_full_gap() {
	let line = GapBuffer::with_capacity(16).expect("allocation succeeds");
	assert_eq!(line.len(), 0);
	assert!(line.is_empty());
	assert_eq!(line.capacity(), 16);
	assert_eq!(line.gap_len(), 16);
	assert_eq!(line.gap_position(), 0);
	assert!(!line.is_modified());
}

#[test]
fn from_text_should_place_gap_at_end() {
	let line = GapBuffer::from_text("hello", 3).expect("allocation succeeds");
	assert_eq!(line.text(), "hello");
	assert_eq!(line.capacity(), 8);
	assert_eq!(line.gap_position(), 5);
	assert_eq!(line.gap_len(), 3);
}

#[test]
fn from_text_should_round_trip_for_any_extra_gap() {
	for text in ["", "a", "some words", "tab\tseparated"] {
		for extra_gap in [0, 1, 2, 64] {
			let line = GapBuffer::from_text(text, extra_gap).expect("allocation succeeds");
			assert_eq!(line.text(), text, "extra_gap={extra_gap}");
		}
	}
}

#[test]
fn insert_char_should_grow_when_gap_is_nearly_closed() {
	let mut line = GapBuffer::with_capacity(4).expect("allocation succeeds");
	for ch in b"abcdefghij" {
		line.insert_char(*ch).expect("insert succeeds");
	}
	assert_eq!(line.text(), "abcdefghij");
	assert!(line.capacity() >= 11);
	assert_eq!(line.gap_position(), 10);
	assert!(line.is_modified());
}

#[test]
fn insert_char_should_work_from_zero_capacity() {
	let mut line = GapBuffer::with_capacity(0).expect("allocation succeeds");
	line.insert_char(b'x').expect("insert succeeds");
	line.insert_char(b'y').expect("insert succeeds");
	assert_eq!(line.text(), "xy");
}

#[test]
fn insert_then_backspace_should_restore_text() {
	let mut line = GapBuffer::from_text("abc", 2).expect("allocation succeeds");
	line.move_gap(1).expect("move succeeds");
	line.insert_char(b'Z').expect("insert succeeds");
	assert_eq!(line.text(), "aZbc");
	line.backspace();
	assert_eq!(line.text(), "abc");
}

#[test]
fn backspace_at_start_should_do_nothing() {
	let mut line = GapBuffer::from_text("abc", 2).expect("allocation succeeds");
	line.move_gap(0).expect("move succeeds");
	line.clear_modified();
	line.backspace();
	assert_eq!(line.text(), "abc");
	assert!(!line.is_modified());
}

#[test]
fn move_gap_should_preserve_text_at_every_offset() {
	let mut line = GapBuffer::from_text("gap buffer", 5).expect("allocation succeeds");
	for target in [0, 10, 3, 7, 7, 1, 9, 0, 5] {
		line.move_gap(target).expect("move succeeds");
		assert_eq!(line.gap_position(), target);
		assert_eq!(line.text(), "gap buffer");
		assert_eq!(line.capacity(), 15);
	}
}

#[test]
fn move_gap_should_clamp_past_end() {
	let mut line = GapBuffer::from_text("abc", 4).expect("allocation succeeds");
	line.move_gap(0).expect("move succeeds");
	line.move_gap(99).expect("move succeeds");
	assert_eq!(line.gap_position(), 3);
	assert_eq!(line.text(), "abc");
}

#[test]
fn insert_after_move_gap_should_land_at_new_offset() {
	let mut line = GapBuffer::from_text("held", 4).expect("allocation succeeds");
	line.move_gap(3).expect("move succeeds");
	line.insert_char(b'l').expect("insert succeeds");
	line.insert_char(b'o').expect("insert succeeds");
	assert_eq!(line.text(), "hellod");
}

#[test]
fn split_should_partition_line_at_gap() {
	let mut line = GapBuffer::from_text("aaaaaaaaab", 10).expect("allocation succeeds");
	line.move_gap(9).expect("move succeeds");
	let tail = line.split().expect("split succeeds");

	assert_eq!(line.text(), "aaaaaaaaa");
	assert_eq!(tail.text(), "b");
	assert_eq!(tail.capacity(), line.capacity());
	assert_eq!(tail.gap_position(), 0);
	assert_eq!(line.gap_len(), line.capacity() - 9);
	assert!(line.is_modified());
	assert!(tail.is_modified());
}

#[test]
fn split_at_ends_should_leave_one_side_empty() {
	let mut line = GapBuffer::from_text("abc", 3).expect("allocation succeeds");
	let tail = line.split().expect("split succeeds");
	assert_eq!(line.text(), "abc");
	assert_eq!(tail.text(), "");

	let mut line = GapBuffer::from_text("abc", 3).expect("allocation succeeds");
	line.move_gap(0).expect("move succeeds");
	let tail = line.split().expect("split succeeds");
	assert_eq!(line.text(), "");
	assert_eq!(tail.text(), "abc");
}

#[test]
fn split_tail_should_accept_inserts_at_its_start() {
	let mut line = GapBuffer::from_text("headtail", 0).expect("allocation succeeds");
	line.move_gap(4).expect("move succeeds");
	let mut tail = line.split().expect("split succeeds");
	tail.insert_char(b'>').expect("insert succeeds");
	assert_eq!(tail.text(), ">tail");
}

#[test]
fn char_at_should_translate_across_gap() {
	let mut line = GapBuffer::from_text("abcdef", 4).expect("allocation succeeds");
	line.move_gap(2).expect("move succeeds");
	let chars = (0..6).map(|i| line.char_at(i).expect("in range")).collect::<Vec<_>>();
	assert_eq!(chars, b"abcdef");
	assert_eq!(line.char_at(6), None);
	assert_eq!(line.char_at(100), None);
}

#[test]
fn as_slices_should_expose_text_around_gap() {
	let mut line = GapBuffer::from_text("abcdef", 4).expect("allocation succeeds");
	line.move_gap(2).expect("move succeeds");
	let (front, back) = line.as_slices();
	assert_eq!(front, b"ab");
	assert_eq!(back, b"cdef");
	assert_eq!(line.to_bytes(), b"abcdef");
}
