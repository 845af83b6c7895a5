use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::view::{VirtualScreen, Window};

pub(super) const FRAME_START: &[u8] = b"\x1b[?25l\x1b[2J\x1b[1;1H";

pub(super) fn buffer_with_text(text: &str) -> TextBuffer {
	TextBuffer::load(Some(text.as_bytes()), 10, 20).expect("buffer loads from memory")
}

/// `count` lines reading `line 0`, `line 1`, ...
pub(super) fn numbered_lines(count: usize) -> String {
	(0..count).map(|i| format!("line {i}\n")).collect()
}

pub(super) fn window_with(text: &str, width: u16, height: u16) -> Window {
	Window::new(buffer_with_text(text), VirtualScreen::new(width, height), "notes.txt", &EditorConfig::default())
}
