use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppAction {
	Editor(EditorAction),
	Layout(LayoutAction),
	File(FileAction),
	System(SystemAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
	InsertChar(u8),
	NewLine,
	Backspace,
	MoveUp,
	MoveDown,
	MoveLeft,
	MoveRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAction {
	ViewportResized { width: u16, height: u16 },
}

#[derive(Debug)]
pub enum FileAction {
	SaveRequested,
	LoadCompleted { path: PathBuf, result: io::Result<Vec<u8>> },
	SaveCompleted { path: PathBuf, revision: u64, result: io::Result<()> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
	Quit,
}
