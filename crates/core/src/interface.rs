// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{Params, Result};

/// A handle to the backing SQL store.
///
/// Statements executed directly on the engine run in one-shot mode, each on
/// a connection of its own. For batched work that depends on per-session
/// state, such as streaming inserts, obtain a dedicated [`StoreSession`] via
/// [`StoreEngine::connect`].
pub trait StoreEngine: Send + Sync {
	type Session: StoreSession;

	/// Execute a single statement and return the number of affected rows.
	fn execute(
		&self,
		sql: &str,
		params: impl Into<Params> + Send,
	) -> impl Future<Output = Result<u64>> + Send;

	/// Open a dedicated session for stateful statement sequences.
	fn connect(&self) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// A dedicated store session.
///
/// Session mode changed by a statement, such as `SET STREAMING ON`, stays in
/// effect for the statements that follow on the same session. The session
/// must be released through [`StoreSession::close`] on every exit path,
/// successful or not.
pub trait StoreSession: Send {
	/// Execute a single statement on this session and return the number
	/// of affected rows.
	fn execute(
		&mut self,
		sql: &str,
		params: impl Into<Params> + Send,
	) -> impl Future<Output = Result<u64>> + Send;

	/// Release the session back to the store.
	fn close(self) -> impl Future<Output = Result<()>> + Send;
}
