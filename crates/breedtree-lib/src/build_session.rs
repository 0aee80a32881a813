//! Building trees off the interactive thread.
//!
//! A [`BuildSession`] owns a worker task. Each [`BuildRequest`] sent to it is tagged with a generation,
//! a newer request supersedes every older one: queued older requests are skipped by the worker
//! and results of older requests are dropped by the session. A build already running is left to finish,
//! it has no side effects so discarding its result is enough.
//!
//! # Usage
//! 1. [`BuildSession::spawn()`] inside a tokio runtime.
//! 1. [`BuildSession::request()`] whenever the root or its marks change.
//! 1. [`BuildSession::next_tree()`] to wait for the tree of the latest request.

use std::sync::Arc;

use serde::{Serialize, Deserialize};
use tokio::sync::mpsc;

use crate::breeding_tree::{build_display_tree, DisplayTreeNode};
use crate::marks::{DirectObtainMarks, OwnedMarks};
use crate::RecipeDB;

/// Everything a build needs. The marks are snapshots, later changes don't affect a sent request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
	pub root: String,
	pub owned: OwnedMarks,
	pub direct_obtain: DirectObtainMarks,
	pub meguriai_enabled: bool,
	pub store: Arc<RecipeDB>,
}

impl BuildRequest {
	/// Builds the tree on the current thread.
	pub fn run(&self) -> crate::Result<DisplayTreeNode> {
		build_display_tree(&self.root, &self.owned, &self.direct_obtain, &self.store, self.meguriai_enabled)
	}
}

pub type Generation = u64;

#[derive(Debug, thiserror::Error)]
pub enum BuildSessionError {
	#[error("build worker has shut down")]
	WorkerGone,
	#[error("no build has been requested")]
	NothingRequested,
	#[error("build task panicked")]
	Panicked,
	#[error("build failed: {0}")]
	Build(#[from] crate::Error),
}

type Response = (Generation, Result<DisplayTreeNode, BuildSessionError>);

#[derive(Debug)]
pub struct BuildSession {
	requests: mpsc::UnboundedSender<(Generation, BuildRequest)>,
	responses: mpsc::UnboundedReceiver<Response>,
	latest: Generation,
	delivered: Generation,
	worker: tokio::task::JoinHandle<()>,
}

impl BuildSession {
	/// Starts the worker task.
	///
	/// # Panics
	/// - If called outside a tokio runtime.
	pub fn spawn() -> Self {
		let (requests, request_rx) = mpsc::unbounded_channel();
		let (response_tx, responses) = mpsc::unbounded_channel();
		let worker = tokio::spawn(worker_loop(request_rx, response_tx));
		Self {
			requests,
			responses,
			latest: 0,
			delivered: 0,
			worker,
		}
	}

	/// Queues a build, superseding every earlier request.
	pub fn request(&mut self, request: BuildRequest) -> Result<Generation, BuildSessionError> {
		let generation = self.latest + 1;
		log::debug!("Requesting build {} for {}", generation, request.root);
		self.requests.send((generation, request)).map_err(|_| BuildSessionError::WorkerGone)?;
		self.latest = generation;
		Ok(generation)
	}

	pub fn latest_generation(&self) -> Generation {
		self.latest
	}

	/// Waits for the result of the latest request, dropping results of older ones.
	///
	/// # Errors
	/// - [`NothingRequested`](BuildSessionError::NothingRequested) before the first request,
	///   or when the latest result was already returned.
	/// - [`Build`](BuildSessionError::Build) when the latest request itself was invalid.
	pub async fn next_tree(&mut self) -> Result<DisplayTreeNode, BuildSessionError> {
		if self.delivered == self.latest {
			return Err(BuildSessionError::NothingRequested);
		}
		loop {
			let (generation, result) = self.responses.recv().await.ok_or(BuildSessionError::WorkerGone)?;
			if generation < self.latest {
				log::debug!("Dropping stale build {} (latest is {})", generation, self.latest);
				continue;
			}
			self.delivered = generation;
			return result;
		}
	}

	/// Stops accepting requests and waits for the worker to finish what it is doing.
	pub async fn shutdown(self) {
		let Self { requests, worker, .. } = self;
		drop(requests);
		if worker.await.is_err() {
			log::error!("Build worker did not shut down cleanly");
		}
	}
}

async fn worker_loop(mut requests: mpsc::UnboundedReceiver<(Generation, BuildRequest)>, responses: mpsc::UnboundedSender<Response>) {
	while let Some(mut next) = requests.recv().await {
		/* Only the newest queued request matters */
		while let Ok(newer) = requests.try_recv() {
			log::debug!("Skipping superseded build {}", next.0);
			next = newer;
		}

		let (generation, request) = next;
		let result = match tokio::task::spawn_blocking(move || request.run()).await {
			Ok(tree) => tree.map_err(BuildSessionError::from),
			Err(e) => {
				log::error!("Build {} failed to complete: {}", generation, e);
				Err(BuildSessionError::Panicked)
			},
		};

		if responses.send((generation, result)).is_err() {
			/* Session dropped */
			break;
		}
	}
	log::debug!("Build worker stopped");
}
