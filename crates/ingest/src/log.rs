// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use gridsink_core::{Timestamp, Value};
use gridsink_sql::{ColumnDef, CreateTableStatement, InsertStatement, Statement};
use serde::Serialize;

/// Name of the load-statistics table, auto-created on first load.
pub const LOG_TABLE: &str = "TB_LOG";

/// One load-statistics record, appended after every completed batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadLogEntry {
	pub start_time: Timestamp,
	pub end_time: Timestamp,
	pub table: String,
	pub row_count: u64,
	pub duration_seconds: i64,
}

impl LoadLogEntry {
	pub fn new(table: impl Into<String>, start_time: Timestamp, end_time: Timestamp, row_count: u64) -> Self {
		// Whole seconds, rounded down
		let duration_seconds = (end_time.to_millis() - start_time.to_millis()).div_euclid(1000);
		Self {
			start_time,
			end_time,
			table: table.into(),
			row_count,
			duration_seconds,
		}
	}

	/// Statement creating the log table on first use.
	pub fn create_statement() -> Statement {
		Statement::CreateTable(CreateTableStatement {
			table: LOG_TABLE.to_string(),
			if_not_exists: true,
			columns: vec![
				column("START_TIME", "TIMESTAMP"),
				column("END_TIME", "TIMESTAMP"),
				column("TAB", "VARCHAR"),
				column("SIZE", "INT"),
				column("DURING_TIME", "INT"),
			],
			primary_key: vec!["START_TIME".to_string()],
		})
	}

	/// Parameterized insert template for log entries.
	pub fn insert_statement() -> Statement {
		Statement::Insert(InsertStatement {
			table: LOG_TABLE.to_string(),
			arity: 5,
		})
	}

	/// Values for the insert template, in column order.
	pub fn params(&self) -> [Value; 5] {
		[
			Value::Timestamp(self.start_time),
			Value::Timestamp(self.end_time),
			Value::Utf8(self.table.clone()),
			Value::Int8(self.row_count as i64),
			Value::Int8(self.duration_seconds),
		]
	}
}

fn column(name: &str, data_type: &str) -> ColumnDef {
	ColumnDef {
		name: name.to_string(),
		data_type: data_type.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use gridsink_sql::emit;

	use super::*;

	fn ts(millis: i64) -> Timestamp {
		Timestamp::from_millis(millis)
	}

	#[test]
	fn test_duration_rounds_down() {
		let entry = LoadLogEntry::new("T1", ts(0), ts(1_999), 10);
		assert_eq!(entry.duration_seconds, 1);

		let entry = LoadLogEntry::new("T1", ts(500), ts(500), 0);
		assert_eq!(entry.duration_seconds, 0);

		let entry = LoadLogEntry::new("T1", ts(0), ts(12_000), 3);
		assert_eq!(entry.duration_seconds, 12);
	}

	#[test]
	fn test_create_statement_grammar() {
		assert_eq!(
			emit(&LoadLogEntry::create_statement()).unwrap(),
			"CREATE TABLE IF NOT EXISTS TB_LOG (START_TIME TIMESTAMP, END_TIME TIMESTAMP, TAB VARCHAR, \
			 SIZE INT, DURING_TIME INT, PRIMARY KEY(START_TIME))"
		);
	}

	#[test]
	fn test_insert_statement_grammar() {
		assert_eq!(emit(&LoadLogEntry::insert_statement()).unwrap(), "INSERT INTO TB_LOG VALUES (?, ?, ?, ?, ?)");
	}

	#[test]
	fn test_params_in_column_order() {
		let entry = LoadLogEntry::new("T1", ts(0), ts(5_000), 42);
		assert_eq!(
			entry.params(),
			[
				Value::Timestamp(ts(0)),
				Value::Timestamp(ts(5_000)),
				Value::Utf8("T1".to_string()),
				Value::Int8(42),
				Value::Int8(5),
			]
		);
	}

	#[test]
	fn test_serializes_camel_case() {
		let entry = LoadLogEntry::new("T1", ts(0), ts(1_000), 2);
		let json = serde_json::to_string(&entry).unwrap();
		assert_eq!(
			json,
			"{\"startTime\":\"1970-01-01 00:00:00.000\",\"endTime\":\"1970-01-01 00:00:01.000\",\
			 \"table\":\"T1\",\"rowCount\":2,\"durationSeconds\":1}"
		);
	}
}
