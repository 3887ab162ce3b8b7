// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Drives the three ingest entry points against the in-memory store engine.
//!
//! Run with `cargo run -p gridsink-ingest --example ingest_demo`.

use gridsink_ingest::{Ingestor, LOG_TABLE, Result};
use gridsink_testing::MemoryEngine;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
		.init();

	let engine = MemoryEngine::new();
	let ingestor = Ingestor::new(engine.clone());

	// Schema message: two columns, id is the primary key
	ingestor.apply_schema(
		"T1",
		r#"[
			{"column":"id","dataType":"INT","isPrimaryKey":true},
			{"column":"name","dataType":"VARCHAR"}
		]"#,
	)
	.await?;
	println!("created: {}", engine.table_ddl("T1").unwrap_or_default());

	// Index message: one statement per descriptor
	let outcomes = ingestor
		.apply_indexes("T1", r#"[{"name":"idx_name","column":"name","inline_size":"128"}]"#)
		.await?;
	for outcome in &outcomes {
		println!("index {}: {:?}", outcome.index, outcome.result);
	}

	// Load message: rows stream on a dedicated session
	let entry = ingestor.load_rows("T1", r#"[["1","alice"],["2","bob"],["3","carol"]]"#).await?;
	println!("loaded {} rows into {} in {}s", entry.row_count, entry.table, entry.duration_seconds);

	for row in engine.rows(LOG_TABLE) {
		println!("log: {row:?}");
	}

	Ok(())
}
