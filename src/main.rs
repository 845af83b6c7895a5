use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ted::app::App;
use ted::config::EditorConfig;
use ted::logging;

#[derive(Debug, Parser)]
#[command(name = "ted", version, about = "A small terminal text editor")]
struct Cli {
	/// File to open. Starts an empty buffer when omitted.
	path:   Option<PathBuf>,
	/// Config file to use instead of the per-user one.
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("{:#}", err);
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();
	let _log_guard = logging::init_logging().context("initialize logging failed")?;
	let config = EditorConfig::load(cli.config.as_deref()).context("load config failed")?;
	let app = App::new(config, cli.path).context("initialize app failed")?;
	app.run().context("run app failed")
}
