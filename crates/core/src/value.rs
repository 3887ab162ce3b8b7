// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A scalar bound to a statement placeholder.
///
/// Row payloads arrive as strings and are bound as [`Value::Utf8`]; the store
/// casts them to the declared column types on insert. The numeric and
/// timestamp variants exist for values produced internally, such as load
/// statistics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
	/// A UTF-8 encoded text value
	Utf8(String),
	/// A 64-bit signed integer value
	Int8(i64),
	/// A timestamp value with millisecond precision
	Timestamp(Timestamp),
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Utf8(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Timestamp(value) => Display::fmt(value, f),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Utf8(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Utf8(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int8(value)
	}
}

impl From<Timestamp> for Value {
	fn from(value: Timestamp) -> Self {
		Value::Timestamp(value)
	}
}
