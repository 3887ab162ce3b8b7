// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test fixtures for gridsink.
//!
//! Provides [`MemoryEngine`], an in-memory [`StoreEngine`] that understands
//! the statement grammar the ingest pipeline produces, records everything it
//! executes, and supports failure and latency injection for exercising error
//! paths deterministically.
//!
//! [`StoreEngine`]: gridsink_core::StoreEngine

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod engine;

pub use engine::{MemoryEngine, MemorySession};
