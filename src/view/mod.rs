//! Mapping buffer state onto a fixed character grid.

use std::fmt;

use thiserror::Error;

mod screen;
mod status_line;
mod window;
pub mod wrap;

pub use screen::VirtualScreen;
pub use status_line::StatusLine;
pub use window::{RenderState, Window};
pub use wrap::{ScreenPosition, required_screen_rows};

#[derive(Debug, Error)]
pub enum ScreenError {
	#[error("line {row} is not in the buffer")]
	LineNotFound { row: usize },
	#[error("status line needs {required} columns but the screen is {width} wide")]
	Layout { width: usize, required: usize },
	#[error("encoding terminal command failed")]
	Escape {
		#[source]
		source: fmt::Error,
	},
}

#[cfg(test)]
mod tests;
