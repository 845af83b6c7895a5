use crate::buffer::TextBuffer;

pub(super) fn buffer_with_text(text: &str) -> TextBuffer {
	TextBuffer::load(Some(text.as_bytes()), 10, 20).expect("buffer loads from memory")
}

pub(super) fn all_lines(buffer: &TextBuffer) -> Vec<String> {
	(0..buffer.line_count()).map(|row| buffer.get_line(row).expect("row in range")).collect()
}
