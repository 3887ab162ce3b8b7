// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use gridsink_sql::{CreateIndexStatement, Statement, emit};
use tracing::{debug, instrument, warn};

use super::{Ingestor, bounded};
use crate::{
	Error, Result, StoreEngine,
	descriptor::{IndexDescriptor, parse_indexes},
};

/// Outcome of one index descriptor within an index message.
#[derive(Debug)]
pub struct IndexOutcome {
	pub index: String,
	pub result: Result<()>,
}

impl IndexOutcome {
	pub fn is_ok(&self) -> bool {
		self.result.is_ok()
	}
}

impl<E: StoreEngine> Ingestor<E> {
	/// Compile an index message into one `CREATE INDEX` statement per
	/// descriptor and execute them independently.
	///
	/// Index creation carries no existence guard, so re-applying a
	/// descriptor fails at the store. One failing descriptor does not
	/// stop the remaining ones; the caller gets one outcome per
	/// descriptor, in message order.
	#[instrument(name = "ingest::index::apply", level = "trace", skip(self, payload))]
	pub async fn apply_indexes(&self, table: &str, payload: &str) -> Result<Vec<IndexOutcome>> {
		// 1. Decode the index descriptors
		let indexes = parse_indexes(payload)?;

		// 2. Execute each descriptor, isolating failures
		let mut outcomes = Vec::with_capacity(indexes.len());
		for descriptor in indexes {
			let result = self.create_index(table, &descriptor).await;
			if let Err(err) = &result {
				warn!("index '{}' on '{}' failed: {err}", descriptor.name, table);
			}
			outcomes.push(IndexOutcome {
				index: descriptor.name,
				result,
			});
		}

		Ok(outcomes)
	}

	async fn create_index(&self, table: &str, descriptor: &IndexDescriptor) -> Result<()> {
		let stmt = Statement::CreateIndex(CreateIndexStatement {
			name: descriptor.name.clone(),
			table: table.to_string(),
			column: descriptor.column.clone(),
			inline_size: descriptor.inline_size,
		});
		let sql = emit(&stmt).map_err(|err| Error::Parse {
			reason: err.to_string(),
		})?;
		debug!(table = %table, "compiled index: {sql}");

		bounded(self.timeouts.statement, "index statement", self.engine.execute(&sql, ())).await?;
		Ok(())
	}
}
