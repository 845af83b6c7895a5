use super::ScreenError;

const ELLIPSIS: &str = "... ";

/// Contents of the bottom row, laid out as
///
/// ```text
/// [file name | row,col    <modified><commands>]
/// ```
///
/// The file name field takes whatever width the other fields leave over.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
	pub file_name:     &'a str,
	pub row:           usize,
	pub col:           usize,
	pub modified:      bool,
	pub modified_text: &'a str,
	pub commands:      &'a str,
}

impl StatusLine<'_> {
	/// Lays the status row out to exactly `width` columns.
	///
	/// A file name longer than its field is cut and suffixed with `"... "`. A screen too narrow for
	/// the fixed fields is a [`ScreenError::Layout`].
	pub fn compose(&self, width: usize) -> Result<String, ScreenError> {
		let position = format!(" | {},{} ", self.row, self.col);
		let modified_width = self.modified_text.chars().count();
		let required = self.commands.chars().count() + modified_width + position.len();
		let name_field = width.checked_sub(required).ok_or(ScreenError::Layout { width, required })?;

		let mut line = String::with_capacity(width);
		let name_width = self.file_name.chars().count();
		let name_written = if name_width > name_field {
			let kept = name_field
				.checked_sub(ELLIPSIS.len())
				.ok_or(ScreenError::Layout { width, required: required + ELLIPSIS.len() })?;
			line.extend(self.file_name.chars().take(kept));
			line.push_str(ELLIPSIS);
			name_field
		} else {
			line.push_str(self.file_name);
			name_width
		};

		line.push_str(&position);
		line.push_str(&" ".repeat(name_field - name_written));
		if self.modified {
			line.push_str(self.modified_text);
		} else {
			line.push_str(&" ".repeat(modified_width));
		}
		line.push_str(self.commands);
		Ok(line)
	}
}
