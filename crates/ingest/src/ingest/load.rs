// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use gridsink_sql::{InsertStatement, SetStreamingStatement, Statement, emit};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::{Ingestor, bounded};
use crate::{
	Error, Params, Result, StoreEngine, StoreSession, Timestamp, descriptor::parse_rows, log::LoadLogEntry,
};

impl<E: StoreEngine> Ingestor<E> {
	/// Bulk-load a row batch into `table` under streaming mode.
	///
	/// The payload is an array of rows; every row is an array of scalar
	/// values sharing the arity of the first row. The batch runs on a
	/// dedicated session with `SET STREAMING ON` in effect, one
	/// parameterized insert per row, in row order. The session is
	/// released on every exit path.
	///
	/// Inserts are not transactional. A failing row aborts the rest of
	/// the batch as [`Error::LoadAborted`], which carries how many rows
	/// were applied before the failure; those rows stay committed. The
	/// statistics entry in [`LOG_TABLE`] is written only for completed
	/// batches, including empty ones.
	///
	/// [`LOG_TABLE`]: crate::LOG_TABLE
	#[instrument(name = "ingest::load::rows", level = "trace", skip(self, payload))]
	pub async fn load_rows(&self, table: &str, payload: &str) -> Result<LoadLogEntry> {
		// 1. Decode the row batch, arity is fixed by the first row
		let batch = parse_rows(payload)?;

		let start_time = Timestamp::now();

		// 2. An empty batch skips the store but still gets a
		// statistics entry
		if batch.is_empty() {
			let entry = LoadLogEntry::new(table, start_time, Timestamp::now(), 0);
			self.append_log_entry(&entry).await?;
			return Ok(entry);
		}

		// 3. Compile both session statements before touching the store
		let streaming_sql = emit(&Statement::SetStreaming(SetStreamingStatement {
			enabled: true,
		}))
		.map_err(|err| Error::Parse {
			reason: err.to_string(),
		})?;
		let insert_sql = emit(&Statement::Insert(InsertStatement {
			table: table.to_string(),
			arity: batch.arity(),
		}))
		.map_err(|err| Error::Parse {
			reason: err.to_string(),
		})?;
		debug!(table = %table, "compiled insert template: {insert_sql}");

		// 4. Open the dedicated session
		let mut session = bounded(self.timeouts.statement, "session open", self.engine.connect()).await?;

		// 5. Stream the rows, bounded by the batch deadline
		let row_count = batch.len() as u64;
		let statement_limit = self.timeouts.statement;
		let mut applied: u64 = 0;
		let outcome = timeout(self.timeouts.batch, async {
			bounded(statement_limit, "enable streaming", session.execute(&streaming_sql, Params::None))
				.await?;
			for row in batch.into_rows() {
				bounded(statement_limit, "row insert", session.execute(&insert_sql, row)).await?;
				applied += 1;
			}
			Ok::<(), Error>(())
		})
		.await
		.unwrap_or_else(|_| {
			Err(Error::Timeout {
				operation: "row batch".to_string(),
				timeout_ms: self.timeouts.batch.as_millis() as u64,
			})
		});

		if let Err(cause) = outcome {
			// Applied rows stay visible, there is no rollback
			if let Err(close_err) = session.close().await {
				warn!("session close after failed load into '{table}' failed: {close_err}");
			}
			return Err(Error::LoadAborted {
				table: table.to_string(),
				rows_applied: applied,
				cause: Box::new(cause),
			});
		}

		let end_time = Timestamp::now();

		// 6. Release the session before the statistics write
		session.close().await?;

		info!(table = %table, rows = applied, "row batch loaded");

		// 7. Record the statistics entry
		let entry = LoadLogEntry::new(table, start_time, end_time, row_count);
		self.append_log_entry(&entry).await?;

		Ok(entry)
	}

	// The log table rides the same guarded create as user tables
	async fn append_log_entry(&self, entry: &LoadLogEntry) -> Result<()> {
		let create_sql = emit(&LoadLogEntry::create_statement()).map_err(|err| Error::Parse {
			reason: err.to_string(),
		})?;
		let insert_sql = emit(&LoadLogEntry::insert_statement()).map_err(|err| Error::Parse {
			reason: err.to_string(),
		})?;

		bounded(self.timeouts.statement, "log table create", self.engine.execute(&create_sql, ())).await?;
		bounded(self.timeouts.statement, "log entry insert", self.engine.execute(&insert_sql, entry.params()))
			.await?;
		Ok(())
	}
}
