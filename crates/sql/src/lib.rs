// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Statement model and SQL text emitter.
//!
//! Every statement the ingest pipeline sends to the store is built as a
//! typed [`Statement`] and rendered through [`emit`], so the DDL/DML grammar
//! lives in exactly one place:
//!
//! - `CREATE TABLE` with optional `IF NOT EXISTS` and a composed
//!   `PRIMARY KEY(...)` clause
//! - `CREATE INDEX` with an `INLINE_SIZE` hint
//! - Parameterized `INSERT` templates with positional placeholders
//! - `SET STREAMING` session-mode toggles

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::fmt::{Display, Formatter};

pub mod ast;
mod emit;

pub use ast::{
	ColumnDef, CreateIndexStatement, CreateTableStatement, InsertStatement, SetStreamingStatement, Statement,
};
pub use emit::emit;

/// Raised when a statement cannot be rendered as valid SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error(pub String);

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::error::Error for Error {}
