// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc, time::Duration};

use gridsink_core::{Error, Params, Result, StoreEngine, StoreSession, Value};
use parking_lot::Mutex;
use tokio::time::sleep;

/// An in-memory store engine speaking the statement grammar the ingest
/// pipeline produces.
///
/// Cloning yields another handle onto the same store. Failure and latency
/// injection make error and timeout paths reproducible:
///
/// - [`fail_matching`] fails any statement whose text or bound parameters
///   contain a needle
/// - [`fail_next_connect`] rejects the next session open
/// - [`set_latency`] delays every statement execution
///
/// [`fail_matching`]: MemoryEngine::fail_matching
/// [`fail_next_connect`]: MemoryEngine::fail_next_connect
/// [`set_latency`]: MemoryEngine::set_latency
#[derive(Clone, Default)]
pub struct MemoryEngine {
	state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
	tables: HashMap<String, TableState>,
	// Index name -> table name, the index namespace is store-wide
	indexes: HashMap<String, String>,
	statements: Vec<String>,
	sessions_opened: u64,
	sessions_closed: u64,
	fail_on: Vec<String>,
	connect_failures: u32,
	latency: Option<Duration>,
}

struct TableState {
	ddl: String,
	rows: Vec<Vec<Value>>,
}

impl State {
	fn injected_failure(&self, sql: &str, params: &Params) -> Option<String> {
		for needle in &self.fail_on {
			if sql.contains(needle.as_str()) {
				return Some(format!("injected failure on '{needle}'"));
			}
			if let Params::Positional(values) = params {
				if values.iter().any(|value| value.to_string().contains(needle.as_str())) {
					return Some(format!("injected failure on '{needle}'"));
				}
			}
		}
		None
	}
}

fn first_word(rest: &str) -> &str {
	rest.split_whitespace().next().unwrap_or("")
}

fn execute_sql(state: &mut State, sql: &str, params: &Params, session_streaming: Option<&mut bool>) -> Result<u64> {
	state.statements.push(sql.to_string());

	if let Some(reason) = state.injected_failure(sql, params) {
		return Err(Error::SqlExecution {
			statement: sql.to_string(),
			reason,
		});
	}

	if let Some(rest) = sql.strip_prefix("SET STREAMING ") {
		// Streaming mode is session state, a pooled one-shot execution
		// must not toggle it
		let Some(streaming) = session_streaming else {
			return Err(Error::SqlExecution {
				statement: sql.to_string(),
				reason: "SET STREAMING requires a dedicated session".to_string(),
			});
		};
		*streaming = rest == "ON";
		return Ok(0);
	}

	if let Some(rest) = sql.strip_prefix("CREATE TABLE ") {
		let (guarded, rest) = match rest.strip_prefix("IF NOT EXISTS ") {
			Some(rest) => (true, rest),
			None => (false, rest),
		};
		let table = first_word(rest);
		return match state.tables.get(table) {
			Some(existing) if guarded => {
				if existing.ddl == sql {
					Ok(0)
				} else {
					Err(Error::SqlExecution {
						statement: sql.to_string(),
						reason: format!("table '{table}' already exists with a different schema"),
					})
				}
			}
			Some(_) => Err(Error::SqlExecution {
				statement: sql.to_string(),
				reason: format!("table '{table}' already exists"),
			}),
			None => {
				state.tables.insert(
					table.to_string(),
					TableState {
						ddl: sql.to_string(),
						rows: Vec::new(),
					},
				);
				Ok(0)
			}
		};
	}

	if let Some(rest) = sql.strip_prefix("CREATE INDEX ") {
		let mut words = rest.split_whitespace();
		let name = words.next().unwrap_or("");
		let table = match (words.next(), words.next()) {
			(Some("ON"), Some(table)) => table,
			_ => {
				return Err(Error::SqlExecution {
					statement: sql.to_string(),
					reason: "malformed CREATE INDEX".to_string(),
				});
			}
		};
		if !state.tables.contains_key(table) {
			return Err(Error::SqlExecution {
				statement: sql.to_string(),
				reason: format!("no such table '{table}'"),
			});
		}
		if state.indexes.contains_key(name) {
			return Err(Error::SqlExecution {
				statement: sql.to_string(),
				reason: format!("index '{name}' already exists"),
			});
		}
		state.indexes.insert(name.to_string(), table.to_string());
		return Ok(0);
	}

	if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
		let table = first_word(rest);
		if !state.tables.contains_key(table) {
			return Err(Error::SqlExecution {
				statement: sql.to_string(),
				reason: format!("no such table '{table}'"),
			});
		}
		let placeholders = sql.matches('?').count();
		if params.len() != placeholders {
			return Err(Error::SqlExecution {
				statement: sql.to_string(),
				reason: format!(
					"statement has {placeholders} placeholders but {} parameters were bound",
					params.len()
				),
			});
		}
		let row = match params {
			Params::Positional(values) => values.clone(),
			Params::None => Vec::new(),
		};
		if let Some(table_state) = state.tables.get_mut(table) {
			table_state.rows.push(row);
		}
		return Ok(1);
	}

	Err(Error::SqlExecution {
		statement: sql.to_string(),
		reason: "unsupported statement".to_string(),
	})
}

impl MemoryEngine {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail every statement whose text or bound parameters contain
	/// `needle`.
	pub fn fail_matching(&self, needle: &str) {
		self.state.lock().fail_on.push(needle.to_string());
	}

	/// Reject the next [`StoreEngine::connect`] call.
	pub fn fail_next_connect(&self) {
		self.state.lock().connect_failures += 1;
	}

	/// Delay every statement execution by `latency`. Session opens are
	/// not delayed.
	pub fn set_latency(&self, latency: Duration) {
		self.state.lock().latency = Some(latency);
	}

	pub fn clear_latency(&self) {
		self.state.lock().latency = None;
	}

	pub fn table_exists(&self, table: &str) -> bool {
		self.state.lock().tables.contains_key(table)
	}

	/// The DDL text the table was created with.
	pub fn table_ddl(&self, table: &str) -> Option<String> {
		self.state.lock().tables.get(table).map(|t| t.ddl.clone())
	}

	pub fn row_count(&self, table: &str) -> usize {
		self.state.lock().tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
	}

	pub fn rows(&self, table: &str) -> Vec<Vec<Value>> {
		self.state.lock().tables.get(table).map(|t| t.rows.clone()).unwrap_or_default()
	}

	pub fn has_index(&self, name: &str) -> bool {
		self.state.lock().indexes.contains_key(name)
	}

	/// Every statement executed so far, in execution order, including
	/// failed ones.
	pub fn statements(&self) -> Vec<String> {
		self.state.lock().statements.clone()
	}

	pub fn sessions_opened(&self) -> u64 {
		self.state.lock().sessions_opened
	}

	/// Sessions opened but not yet released.
	pub fn open_sessions(&self) -> u64 {
		let state = self.state.lock();
		state.sessions_opened - state.sessions_closed
	}

	async fn delay(&self) {
		let latency = self.state.lock().latency;
		if let Some(latency) = latency {
			sleep(latency).await;
		}
	}
}

impl StoreEngine for MemoryEngine {
	type Session = MemorySession;

	async fn execute(&self, sql: &str, params: impl Into<Params> + Send) -> Result<u64> {
		let params = params.into();
		self.delay().await;
		let mut state = self.state.lock();
		execute_sql(&mut state, sql, &params, None)
	}

	async fn connect(&self) -> Result<MemorySession> {
		let mut state = self.state.lock();
		if state.connect_failures > 0 {
			state.connect_failures -= 1;
			return Err(Error::Connection {
				reason: "injected connect failure".to_string(),
			});
		}
		state.sessions_opened += 1;
		Ok(MemorySession {
			state: Arc::clone(&self.state),
			streaming: false,
			closed: false,
		})
	}
}

/// A dedicated session on a [`MemoryEngine`].
///
/// Dropping an unclosed session releases it, mirroring a pooled connection
/// returned by its guard.
pub struct MemorySession {
	state: Arc<Mutex<State>>,
	streaming: bool,
	closed: bool,
}

impl MemorySession {
	/// Whether `SET STREAMING ON` is in effect for this session.
	pub fn streaming(&self) -> bool {
		self.streaming
	}
}

impl StoreSession for MemorySession {
	async fn execute(&mut self, sql: &str, params: impl Into<Params> + Send) -> Result<u64> {
		let params = params.into();
		let latency = self.state.lock().latency;
		if let Some(latency) = latency {
			sleep(latency).await;
		}
		let mut state = self.state.lock();
		execute_sql(&mut state, sql, &params, Some(&mut self.streaming))
	}

	async fn close(mut self) -> Result<()> {
		self.closed = true;
		self.state.lock().sessions_closed += 1;
		Ok(())
	}
}

impl Drop for MemorySession {
	fn drop(&mut self) {
		if !self.closed {
			self.state.lock().sessions_closed += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use gridsink_core::params;

	use super::*;

	#[tokio::test]
	async fn test_create_and_insert() {
		let engine = MemoryEngine::new();
		engine.execute("CREATE TABLE IF NOT EXISTS T1 (id INT, PRIMARY KEY(id))", Params::None)
			.await
			.unwrap();
		assert!(engine.table_exists("T1"));

		let affected = engine.execute("INSERT INTO T1 VALUES (?)", params!["1"]).await.unwrap();
		assert_eq!(affected, 1);
		assert_eq!(engine.row_count("T1"), 1);
		assert_eq!(engine.rows("T1"), vec![vec![Value::Utf8("1".to_string())]]);
	}

	#[tokio::test]
	async fn test_create_table_guard_is_idempotent() {
		let engine = MemoryEngine::new();
		let ddl = "CREATE TABLE IF NOT EXISTS T1 (id INT)";
		engine.execute(ddl, Params::None).await.unwrap();
		engine.execute(ddl, Params::None).await.unwrap();
		assert_eq!(engine.table_ddl("T1"), Some(ddl.to_string()));
	}

	#[tokio::test]
	async fn test_create_table_conflicting_schema_rejected() {
		let engine = MemoryEngine::new();
		engine.execute("CREATE TABLE IF NOT EXISTS T1 (id INT)", Params::None).await.unwrap();
		let result = engine.execute("CREATE TABLE IF NOT EXISTS T1 (id VARCHAR)", Params::None).await;
		match result {
			Err(Error::SqlExecution {
				reason,
				..
			}) => assert!(reason.contains("different schema")),
			other => panic!("Expected SqlExecution, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_insert_into_missing_table() {
		let engine = MemoryEngine::new();
		let result = engine.execute("INSERT INTO T9 VALUES (?)", params!["1"]).await;
		match result {
			Err(Error::SqlExecution {
				reason,
				..
			}) => assert_eq!(reason, "no such table 'T9'"),
			other => panic!("Expected SqlExecution, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_insert_placeholder_mismatch() {
		let engine = MemoryEngine::new();
		engine.execute("CREATE TABLE IF NOT EXISTS T1 (a INT, b INT)", Params::None).await.unwrap();
		let result = engine.execute("INSERT INTO T1 VALUES (?, ?)", params!["1"]).await;
		match result {
			Err(Error::SqlExecution {
				reason,
				..
			}) => assert!(reason.contains("2 placeholders")),
			other => panic!("Expected SqlExecution, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_streaming_needs_session() {
		let engine = MemoryEngine::new();
		assert!(engine.execute("SET STREAMING ON", Params::None).await.is_err());

		let mut session = engine.connect().await.unwrap();
		session.execute("SET STREAMING ON", Params::None).await.unwrap();
		assert!(session.streaming());
		session.execute("SET STREAMING OFF", Params::None).await.unwrap();
		assert!(!session.streaming());
		session.close().await.unwrap();
		assert_eq!(engine.open_sessions(), 0);
	}

	#[tokio::test]
	async fn test_dropped_session_is_released() {
		let engine = MemoryEngine::new();
		{
			let _session = engine.connect().await.unwrap();
			assert_eq!(engine.open_sessions(), 1);
		}
		assert_eq!(engine.open_sessions(), 0);
	}

	#[tokio::test]
	async fn test_failure_injection_matches_params() {
		let engine = MemoryEngine::new();
		engine.execute("CREATE TABLE IF NOT EXISTS T1 (a VARCHAR)", Params::None).await.unwrap();
		engine.fail_matching("boom");

		assert!(engine.execute("INSERT INTO T1 VALUES (?)", params!["fine"]).await.is_ok());
		assert!(engine.execute("INSERT INTO T1 VALUES (?)", params!["boom"]).await.is_err());
		assert_eq!(engine.row_count("T1"), 1);
	}

	#[tokio::test]
	async fn test_connect_failure_injected_once() {
		let engine = MemoryEngine::new();
		engine.fail_next_connect();
		match engine.connect().await {
			Err(Error::Connection {
				..
			}) => {}
			other => panic!("Expected Connection, got {:?}", other.map(|_| ())),
		}
		assert!(engine.connect().await.is_ok());
	}

	#[tokio::test]
	async fn test_duplicate_index_rejected() {
		let engine = MemoryEngine::new();
		engine.execute("CREATE TABLE IF NOT EXISTS T1 (id INT)", Params::None).await.unwrap();
		engine.execute("CREATE INDEX idx_id ON T1 (id) INLINE_SIZE 128", Params::None).await.unwrap();
		assert!(engine.has_index("idx_id"));

		let result = engine.execute("CREATE INDEX idx_id ON T1 (id) INLINE_SIZE 128", Params::None).await;
		match result {
			Err(Error::SqlExecution {
				reason,
				..
			}) => assert_eq!(reason, "index 'idx_id' already exists"),
			other => panic!("Expected SqlExecution, got {other:?}"),
		}
	}
}
