//! Per-user directories for config and logs.
//!
//! XDG base directories are honored on Unix when set to an absolute path; a relative value is
//! ignored, per the XDG base directory rules.

use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR: &str = "ted";

/// Directory holding `config.toml`.
pub fn config_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		base_or_temp(std::env::var_os("APPDATA")).join(APP_DIR)
	}

	#[cfg(not(target_os = "windows"))]
	{
		xdg_dir(std::env::var_os("XDG_CONFIG_HOME"), std::env::var_os("HOME"), &[".config"])
	}
}

/// Directory holding `ted.log`.
pub fn log_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		base_or_temp(std::env::var_os("LOCALAPPDATA")).join(APP_DIR).join("logs")
	}

	#[cfg(target_os = "macos")]
	{
		base_or_temp(std::env::var_os("HOME")).join("Library").join("Logs").join(APP_DIR)
	}

	#[cfg(all(unix, not(target_os = "macos")))]
	{
		xdg_dir(std::env::var_os("XDG_STATE_HOME"), std::env::var_os("HOME"), &[".local", "state"]).join("logs")
	}
}

fn base_or_temp(base: Option<OsString>) -> PathBuf {
	base.map(PathBuf::from).unwrap_or_else(std::env::temp_dir)
}

/// `$xdg_home/ted`, or `$home/<fallback..>/ted` when the XDG variable is unset or relative.
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn xdg_dir(xdg_home: Option<OsString>, home: Option<OsString>, fallback: &[&str]) -> PathBuf {
	if let Some(base) = xdg_home.map(PathBuf::from).filter(|base| base.is_absolute()) {
		return base.join(APP_DIR);
	}
	fallback.iter().fold(base_or_temp(home), |dir, part| dir.join(part)).join(APP_DIR)
}
