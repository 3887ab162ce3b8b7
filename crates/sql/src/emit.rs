// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use crate::{Error, ast::*};

pub fn emit(stmt: &Statement) -> Result<String, Error> {
	match stmt {
		Statement::CreateTable(ct) => emit_create_table(ct),
		Statement::CreateIndex(ci) => emit_create_index(ci),
		Statement::Insert(ins) => emit_insert(ins),
		Statement::SetStreaming(ss) => emit_set_streaming(ss),
	}
}

// ── Identifier & type validation ────────────────────────────────────────

fn check_identifier(ident: &str, what: &str) -> Result<(), Error> {
	let mut chars = ident.chars();
	let valid = match chars.next() {
		Some(first) => {
			(first.is_ascii_alphabetic() || first == '_')
				&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		}
		None => false,
	};
	if valid {
		Ok(())
	} else {
		Err(Error(format!("invalid {what}: '{ident}'")))
	}
}

// Types arrive verbatim from descriptors, so parameterized forms like
// VARCHAR(16) or DECIMAL(10, 2) must pass
fn check_data_type(data_type: &str) -> Result<(), Error> {
	let mut chars = data_type.chars();
	let valid = match chars.next() {
		Some(first) => {
			first.is_ascii_alphabetic()
				&& chars.all(|c| {
					c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')' | ',' | ' ')
				})
		}
		None => false,
	};
	if valid {
		Ok(())
	} else {
		Err(Error(format!("invalid data type: '{data_type}'")))
	}
}

// ── CREATE TABLE ────────────────────────────────────────────────────────

fn emit_create_table(ct: &CreateTableStatement) -> Result<String, Error> {
	check_identifier(&ct.table, "table name")?;
	if ct.columns.is_empty() {
		return Err(Error(format!("table '{}' has no columns", ct.table)));
	}

	let mut seen = HashSet::new();
	let mut cols = Vec::new();
	for col in &ct.columns {
		check_identifier(&col.name, "column name")?;
		check_data_type(&col.data_type)?;
		if !seen.insert(col.name.as_str()) {
			return Err(Error(format!("duplicate column '{}' in table '{}'", col.name, ct.table)));
		}
		cols.push(format!("{} {}", col.name, col.data_type));
	}

	// The primary key clause joins the column list as its last entry
	for key in &ct.primary_key {
		if !seen.contains(key.as_str()) {
			return Err(Error(format!("primary key column '{key}' is not in the column list")));
		}
	}
	if !ct.primary_key.is_empty() {
		cols.push(format!("PRIMARY KEY({})", ct.primary_key.join(", ")));
	}

	let if_ne = if ct.if_not_exists {
		" IF NOT EXISTS"
	} else {
		""
	};
	Ok(format!("CREATE TABLE{if_ne} {} ({})", ct.table, cols.join(", ")))
}

// ── CREATE INDEX ────────────────────────────────────────────────────────

fn emit_create_index(ci: &CreateIndexStatement) -> Result<String, Error> {
	check_identifier(&ci.name, "index name")?;
	check_identifier(&ci.table, "table name")?;
	check_identifier(&ci.column, "column name")?;

	Ok(format!("CREATE INDEX {} ON {} ({}) INLINE_SIZE {}", ci.name, ci.table, ci.column, ci.inline_size))
}

// ── INSERT template ─────────────────────────────────────────────────────

fn emit_insert(ins: &InsertStatement) -> Result<String, Error> {
	check_identifier(&ins.table, "table name")?;
	if ins.arity == 0 {
		return Err(Error(format!("INSERT into '{}' needs at least one placeholder", ins.table)));
	}

	let placeholders = vec!["?"; ins.arity].join(", ");
	Ok(format!("INSERT INTO {} VALUES ({})", ins.table, placeholders))
}

// ── SET STREAMING ───────────────────────────────────────────────────────

fn emit_set_streaming(ss: &SetStreamingStatement) -> Result<String, Error> {
	if ss.enabled {
		Ok("SET STREAMING ON".into())
	} else {
		Ok("SET STREAMING OFF".into())
	}
}
