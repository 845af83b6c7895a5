use super::GapBuffer;

/// Display form of a line: every tab becomes `tab_size` spaces, everything else is copied through.
pub fn render_line(line: &GapBuffer, tab_size: usize) -> Vec<u8> {
	let mut rendered = Vec::with_capacity(line.len().saturating_mul(2));
	for byte in line.bytes() {
		if byte == b'\t' {
			rendered.resize(rendered.len() + tab_size, b' ');
		} else {
			rendered.push(byte);
		}
	}
	rendered
}

/// Display width of the first `col` bytes of `line` once tabs are expanded.
pub(crate) fn display_column(line: &GapBuffer, col: usize, tab_size: usize) -> usize {
	line.bytes().take(col).map(|byte| if byte == b'\t' { tab_size } else { 1 }).sum()
}
