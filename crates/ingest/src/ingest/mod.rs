// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use gridsink_core::{Error, Result, StoreEngine};
use tokio::time::timeout;

use crate::config::Timeouts;

mod index;
mod load;
mod schema;

pub use index::IndexOutcome;

/// Entry points of the ingest pipeline.
///
/// One `Ingestor` serves any number of concurrent invocations. Schema and
/// index statements run one-shot on the engine handle; every load opens a
/// dedicated session so streaming mode never leaks across batches.
pub struct Ingestor<E> {
	engine: E,
	timeouts: Timeouts,
}

impl<E: StoreEngine> Ingestor<E> {
	pub fn new(engine: E) -> Self {
		Self {
			engine,
			timeouts: Timeouts::default(),
		}
	}

	pub fn with_timeouts(engine: E, timeouts: Timeouts) -> Self {
		Self {
			engine,
			timeouts,
		}
	}
}

// Applies the per-statement deadline to one store interaction
async fn bounded<T>(limit: Duration, operation: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
	match timeout(limit, fut).await {
		Ok(result) => result,
		Err(_) => Err(Error::Timeout {
			operation: operation.to_string(),
			timeout_ms: limit.as_millis() as u64,
		}),
	}
}
