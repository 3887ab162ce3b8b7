// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! JSON message to SQL ingest pipeline.
//!
//! Each incoming message carries a table key and a JSON payload describing
//! either a table schema, a set of indexes, or a batch of rows. The
//! [`Ingestor`] compiles the payload into DDL/DML and executes it against a
//! [`StoreEngine`]:
//!
//! - [`Ingestor::apply_schema`] creates the table from column descriptors,
//!   composing a primary key from flagged columns
//! - [`Ingestor::apply_indexes`] creates one index per descriptor, isolating
//!   failures per descriptor
//! - [`Ingestor::load_rows`] bulk-loads a row batch on a dedicated streaming
//!   session and records load statistics in [`LOG_TABLE`]
//!
//! The three entry points share no state beyond the engine handle and may
//! run concurrently.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod descriptor;
mod ingest;
mod log;

pub use config::{Discovery, StoreConfig, Timeouts};
pub use descriptor::{ColumnDescriptor, IndexDescriptor, RowBatch};
pub use gridsink_core::{Error, Params, Result, StoreEngine, StoreSession, Timestamp, Value};
pub use ingest::{IndexOutcome, Ingestor};
pub use log::{LOG_TABLE, LoadLogEntry};
