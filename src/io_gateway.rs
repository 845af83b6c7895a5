use std::io;
use std::path::PathBuf;
use std::thread;

use thiserror::Error;
use tracing::{debug, error};

use crate::action::{AppAction, FileAction};

#[derive(Debug, Error)]
pub enum IoGatewayError {
	#[error("{operation} failed: io request channel is disconnected")]
	RequestChannelDisconnected { operation: &'static str },
}

/// Front end of the file I/O worker. Requests are queued to a dedicated thread and their results
/// come back on the app's event channel as [`FileAction`]s.
pub(crate) struct IoGateway {
	request_tx: flume::Sender<IoRequest>,
}

impl IoGateway {
	pub(crate) fn start(event_tx: flume::Sender<AppAction>) -> Self {
		let (request_tx, request_rx) = flume::unbounded();

		thread::spawn(move || IoWorker::run(request_rx, event_tx));

		Self { request_tx }
	}

	pub(crate) fn enqueue_load(&self, path: PathBuf) -> Result<(), IoGatewayError> {
		self.send(IoRequest::Load { path }, "enqueue_load")
	}

	/// Queues `bytes` to replace the contents of `path`. `revision` is echoed back in the
	/// completion so the caller knows which edits reached disk.
	pub(crate) fn enqueue_save(&self, path: PathBuf, revision: u64, bytes: Vec<u8>) -> Result<(), IoGatewayError> {
		self.send(IoRequest::Save { path, revision, bytes }, "enqueue_save")
	}

	fn send(&self, request: IoRequest, operation: &'static str) -> Result<(), IoGatewayError> {
		self.request_tx.send(request).map_err(|err| {
			error!("{operation} failed: io request channel is disconnected: {err}");
			IoGatewayError::RequestChannelDisconnected { operation }
		})
	}
}

struct IoWorker;

impl IoWorker {
	fn run(request_rx: flume::Receiver<IoRequest>, event_tx: flume::Sender<AppAction>) {
		let runtime = match compio::runtime::Runtime::new() {
			Ok(runtime) => runtime,
			Err(err) => {
				error!("io worker runtime init failed: {err}");
				while let Ok(request) = request_rx.recv() {
					let failure = io::Error::new(err.kind(), err.to_string());
					if !Self::report(&event_tx, request.fail(failure)) {
						return;
					}
				}
				return;
			}
		};

		while let Ok(request) = request_rx.recv() {
			let completion = match request {
				IoRequest::Load { path } => {
					let result = runtime.block_on(compio::fs::read(path.clone()));
					debug!(path = %path.display(), ok = result.is_ok(), "load finished");
					FileAction::LoadCompleted { path, result }
				}
				IoRequest::Save { path, revision, bytes } => {
					let result = runtime.block_on(Self::write_file(path.clone(), bytes));
					debug!(path = %path.display(), revision, ok = result.is_ok(), "save finished");
					FileAction::SaveCompleted { path, revision, result }
				}
			};
			if !Self::report(&event_tx, completion) {
				return;
			}
		}
	}

	async fn write_file(path: PathBuf, bytes: Vec<u8>) -> io::Result<()> {
		compio::fs::write(path, bytes).await.0
	}

	fn report(event_tx: &flume::Sender<AppAction>, completion: FileAction) -> bool {
		if let Err(err) = event_tx.send(AppAction::File(completion)) {
			error!("io worker failed to send completion event: {err}");
			return false;
		}
		true
	}
}

enum IoRequest {
	Load { path: PathBuf },
	Save { path: PathBuf, revision: u64, bytes: Vec<u8> },
}

impl IoRequest {
	fn fail(self, err: io::Error) -> FileAction {
		match self {
			Self::Load { path } => FileAction::LoadCompleted { path, result: Err(err) },
			Self::Save { path, revision, .. } => FileAction::SaveCompleted { path, revision, result: Err(err) },
		}
	}
}
