// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Core types for the gridsink ingest pipeline.
//!
//! This crate provides:
//! - [`Value`] and [`Params`] for positional statement binding
//! - [`Timestamp`], a wall-clock instant with millisecond precision
//! - The [`Error`] taxonomy shared by every ingest entry point
//! - The [`StoreEngine`] and [`StoreSession`] traits connecting the
//!   pipeline to a SQL-capable store

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod error;
mod interface;
mod params;
mod timestamp;
mod value;

pub use error::{Error, Result};
pub use interface::{StoreEngine, StoreSession};
pub use params::Params;
pub use timestamp::Timestamp;
pub use value::Value;
