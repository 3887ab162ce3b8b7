// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Errors surfaced at the ingest entry-point boundary.
///
/// Every variant distinguishes where an invocation failed: before anything
/// executed (`Parse`), at the engine (`Schema`, `SqlExecution`), while
/// obtaining a session (`Connection`), or against a deadline (`Timeout`).
/// `LoadAborted` wraps a load-path failure together with the number of rows
/// that were already committed, since row inserts are not transactional.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("malformed payload: {reason}")]
	Parse {
		reason: String,
	},

	#[error("schema rejected for table '{table}': {reason}")]
	Schema {
		table: String,
		reason: String,
	},

	#[error("statement failed: {reason}")]
	SqlExecution {
		statement: String,
		reason: String,
	},

	#[error("cannot obtain store session: {reason}")]
	Connection {
		reason: String,
	},

	#[error("{operation} exceeded deadline of {timeout_ms}ms")]
	Timeout {
		operation: String,
		timeout_ms: u64,
	},

	#[error("load into '{table}' aborted after {rows_applied} rows: {cause}")]
	LoadAborted {
		table: String,
		rows_applied: u64,
		#[source]
		cause: Box<Error>,
	},
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_display() {
		let err = Error::Parse {
			reason: "expected an array".to_string(),
		};
		assert_eq!(err.to_string(), "malformed payload: expected an array");
	}

	#[test]
	fn test_schema_display() {
		let err = Error::Schema {
			table: "T1".to_string(),
			reason: "column type conflict".to_string(),
		};
		assert_eq!(err.to_string(), "schema rejected for table 'T1': column type conflict");
	}

	#[test]
	fn test_timeout_display() {
		let err = Error::Timeout {
			operation: "row insert".to_string(),
			timeout_ms: 30_000,
		};
		assert_eq!(err.to_string(), "row insert exceeded deadline of 30000ms");
	}

	#[test]
	fn test_load_aborted_preserves_cause() {
		let err = Error::LoadAborted {
			table: "T1".to_string(),
			rows_applied: 7,
			cause: Box::new(Error::SqlExecution {
				statement: "INSERT INTO T1 VALUES (?)".to_string(),
				reason: "constraint violation".to_string(),
			}),
		};
		assert_eq!(err.to_string(), "load into 'T1' aborted after 7 rows: statement failed: constraint violation");

		match err {
			Error::LoadAborted {
				rows_applied,
				cause,
				..
			} => {
				assert_eq!(rows_applied, 7);
				assert!(matches!(*cause, Error::SqlExecution { .. }));
			}
			_ => panic!("Expected LoadAborted"),
		}
	}
}
