// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use gridsink_sql::{ColumnDef, CreateTableStatement, Statement, emit};
use tracing::{debug, instrument};

use super::{Ingestor, bounded};
use crate::{
	Error, Result, StoreEngine,
	descriptor::{ColumnDescriptor, parse_columns},
};

impl<E: StoreEngine> Ingestor<E> {
	/// Compile a schema message into `CREATE TABLE IF NOT EXISTS` and
	/// execute it.
	///
	/// The payload is an array of column descriptors, in column order.
	/// Descriptors flagged as primary key become a composed
	/// `PRIMARY KEY(...)` clause, preserving descriptor order.
	/// Re-applying an identical schema is a no-op; a conflicting schema
	/// on an existing table is rejected by the store and surfaces as
	/// [`Error::Schema`].
	#[instrument(name = "ingest::schema::apply", level = "trace", skip(self, payload))]
	pub async fn apply_schema(&self, table: &str, payload: &str) -> Result<()> {
		// 1. Decode the column descriptors
		let columns = parse_columns(payload)?;

		// 2. Compile the statement
		let sql = compile_create_table(table, &columns)?;
		debug!(table = %table, "compiled schema: {sql}");

		// 3. Execute against the store
		match bounded(self.timeouts.statement, "schema statement", self.engine.execute(&sql, ())).await {
			Ok(_) => Ok(()),
			Err(Error::SqlExecution {
				reason,
				..
			}) => Err(Error::Schema {
				table: table.to_string(),
				reason,
			}),
			Err(other) => Err(other),
		}
	}
}

fn compile_create_table(table: &str, columns: &[ColumnDescriptor]) -> Result<String> {
	let primary_key = columns
		.iter()
		.filter(|column| column.is_primary_key)
		.map(|column| column.name.clone())
		.collect();

	let stmt = Statement::CreateTable(CreateTableStatement {
		table: table.to_string(),
		if_not_exists: true,
		columns: columns
			.iter()
			.map(|column| ColumnDef {
				name: column.name.clone(),
				data_type: column.data_type.clone(),
			})
			.collect(),
		primary_key,
	});

	emit(&stmt).map_err(|err| Error::Parse {
		reason: err.to_string(),
	})
}
