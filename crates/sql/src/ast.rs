// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// A statement the emitter knows how to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	CreateTable(CreateTableStatement),
	CreateIndex(CreateIndexStatement),
	Insert(InsertStatement),
	SetStreaming(SetStreamingStatement),
}

/// One column of a `CREATE TABLE` statement.
///
/// `data_type` is passed through to the store verbatim, so parameterized
/// types such as `VARCHAR(16)` or `DECIMAL(10, 2)` are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
	pub name: String,
	pub data_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
	pub table: String,
	pub if_not_exists: bool,
	pub columns: Vec<ColumnDef>,
	// Subset of the column names, in primary key order
	pub primary_key: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
	pub name: String,
	pub table: String,
	pub column: String,
	pub inline_size: u32,
}

/// A parameterized insert template with `arity` positional placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
	pub table: String,
	pub arity: usize,
}

/// Toggles the streaming bulk-load mode of the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SetStreamingStatement {
	pub enabled: bool,
}
