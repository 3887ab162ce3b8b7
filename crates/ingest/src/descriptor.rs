// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use gridsink_core::{Error, Value};
use serde::{
	Deserialize, Deserializer,
	de::{self, Visitor},
};
use serde_json::Value as JsonValue;

/// Describes one column of a schema message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
	#[serde(rename = "column")]
	pub name: String,
	pub data_type: String,
	#[serde(default)]
	pub is_primary_key: bool,
}

/// Describes one index of an index message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexDescriptor {
	pub name: String,
	pub column: String,
	// Producers send the inline size as a number or a numeric string
	#[serde(deserialize_with = "deserialize_inline_size")]
	pub inline_size: u32,
}

fn deserialize_inline_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	struct InlineSizeVisitor;

	impl<'de> Visitor<'de> for InlineSizeVisitor {
		type Value = u32;

		fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
			formatter.write_str("an inline size as a number or numeric string")
		}

		fn visit_u64<E>(self, value: u64) -> Result<u32, E>
		where
			E: de::Error,
		{
			u32::try_from(value).map_err(|_| E::custom(format!("inline size out of range: {value}")))
		}

		fn visit_i64<E>(self, value: i64) -> Result<u32, E>
		where
			E: de::Error,
		{
			u32::try_from(value).map_err(|_| E::custom(format!("inline size out of range: {value}")))
		}

		fn visit_str<E>(self, value: &str) -> Result<u32, E>
		where
			E: de::Error,
		{
			value.trim()
				.parse::<u32>()
				.map_err(|_| E::custom(format!("invalid inline size: '{value}'")))
		}
	}

	deserializer.deserialize_any(InlineSizeVisitor)
}

/// A batch of rows to load. All rows share the arity of the first row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBatch {
	rows: Vec<Vec<Value>>,
}

impl RowBatch {
	/// Number of values per row, `0` for an empty batch.
	pub fn arity(&self) -> usize {
		self.rows.first().map(Vec::len).unwrap_or(0)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn rows(&self) -> &[Vec<Value>] {
		&self.rows
	}

	pub fn into_rows(self) -> Vec<Vec<Value>> {
		self.rows
	}
}

pub(crate) fn parse_columns(payload: &str) -> crate::Result<Vec<ColumnDescriptor>> {
	let columns: Vec<ColumnDescriptor> = serde_json::from_str(payload).map_err(parse_error)?;

	if columns.is_empty() {
		return Err(Error::Parse {
			reason: "schema message contains no column descriptors".to_string(),
		});
	}
	let mut seen = HashSet::new();
	for column in &columns {
		if !seen.insert(column.name.as_str()) {
			return Err(Error::Parse {
				reason: format!("duplicate column '{}' in schema message", column.name),
			});
		}
	}

	Ok(columns)
}

pub(crate) fn parse_indexes(payload: &str) -> crate::Result<Vec<IndexDescriptor>> {
	serde_json::from_str(payload).map_err(parse_error)
}

pub(crate) fn parse_rows(payload: &str) -> crate::Result<RowBatch> {
	let raw: Vec<Vec<JsonValue>> = serde_json::from_str(payload).map_err(parse_error)?;

	let arity = raw.first().map(Vec::len).unwrap_or(0);
	let mut rows = Vec::with_capacity(raw.len());
	for (row_index, raw_row) in raw.into_iter().enumerate() {
		if raw_row.len() != arity {
			return Err(Error::Parse {
				reason: format!(
					"row {row_index} has {} values, expected {arity} from the first row",
					raw_row.len()
				),
			});
		}
		let mut row = Vec::with_capacity(raw_row.len());
		for (position, scalar) in raw_row.into_iter().enumerate() {
			row.push(scalar_value(scalar, row_index, position)?);
		}
		rows.push(row);
	}

	Ok(RowBatch {
		rows,
	})
}

// Row values are bound as text, the store casts them against the declared
// column types on insert
fn scalar_value(scalar: JsonValue, row: usize, position: usize) -> crate::Result<Value> {
	match scalar {
		JsonValue::String(text) => Ok(Value::Utf8(text)),
		JsonValue::Number(number) => Ok(Value::Utf8(number.to_string())),
		JsonValue::Bool(flag) => Ok(Value::Utf8(flag.to_string())),
		JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => Err(Error::Parse {
			reason: format!("row {row} position {position} is not a scalar value"),
		}),
	}
}

fn parse_error(source: serde_json::Error) -> Error {
	Error::Parse {
		reason: source.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_columns() {
		let columns = parse_columns(
			r#"[
				{"column":"id","dataType":"INT","isPrimaryKey":true},
				{"column":"name","dataType":"VARCHAR"}
			]"#,
		)
		.unwrap();

		assert_eq!(
			columns,
			vec![
				ColumnDescriptor {
					name: "id".to_string(),
					data_type: "INT".to_string(),
					is_primary_key: true,
				},
				ColumnDescriptor {
					name: "name".to_string(),
					data_type: "VARCHAR".to_string(),
					is_primary_key: false,
				},
			]
		);
	}

	#[test]
	fn test_parse_columns_rejects_missing_data_type() {
		let err = parse_columns(r#"[{"column":"id"}]"#).unwrap_err();
		assert!(err.to_string().contains("dataType"));
	}

	#[test]
	fn test_parse_columns_rejects_empty_list() {
		let err = parse_columns("[]").unwrap_err();
		assert_eq!(err.to_string(), "malformed payload: schema message contains no column descriptors");
	}

	#[test]
	fn test_parse_columns_rejects_duplicates() {
		let err = parse_columns(
			r#"[
				{"column":"id","dataType":"INT"},
				{"column":"id","dataType":"VARCHAR"}
			]"#,
		)
		.unwrap_err();
		assert_eq!(err.to_string(), "malformed payload: duplicate column 'id' in schema message");
	}

	#[test]
	fn test_parse_columns_rejects_garbage() {
		assert!(parse_columns("not json").is_err());
		assert!(parse_columns(r#"{"column":"id"}"#).is_err());
	}

	#[test]
	fn test_parse_indexes_with_string_inline_size() {
		let indexes = parse_indexes(r#"[{"name":"idx_id","column":"id","inline_size":"128"}]"#).unwrap();
		assert_eq!(
			indexes,
			vec![IndexDescriptor {
				name: "idx_id".to_string(),
				column: "id".to_string(),
				inline_size: 128,
			}]
		);
	}

	#[test]
	fn test_parse_indexes_with_numeric_inline_size() {
		let indexes = parse_indexes(r#"[{"name":"idx_id","column":"id","inline_size":64}]"#).unwrap();
		assert_eq!(indexes[0].inline_size, 64);
	}

	#[test]
	fn test_parse_indexes_rejects_bad_inline_size() {
		assert!(parse_indexes(r#"[{"name":"i","column":"c","inline_size":"big"}]"#).is_err());
		assert!(parse_indexes(r#"[{"name":"i","column":"c","inline_size":-1}]"#).is_err());
	}

	#[test]
	fn test_parse_indexes_empty_list() {
		assert_eq!(parse_indexes("[]").unwrap(), vec![]);
	}

	#[test]
	fn test_parse_rows() {
		let batch = parse_rows(r#"[["1","alice"],["2","bob"]]"#).unwrap();
		assert_eq!(batch.len(), 2);
		assert_eq!(batch.arity(), 2);
		assert_eq!(
			batch.rows()[0],
			vec![Value::Utf8("1".to_string()), Value::Utf8("alice".to_string())]
		);
	}

	#[test]
	fn test_parse_rows_coerces_scalars_to_text() {
		let batch = parse_rows(r#"[[1, 2.5, true, "x"]]"#).unwrap();
		assert_eq!(
			batch.rows()[0],
			vec![
				Value::Utf8("1".to_string()),
				Value::Utf8("2.5".to_string()),
				Value::Utf8("true".to_string()),
				Value::Utf8("x".to_string()),
			]
		);
	}

	#[test]
	fn test_parse_rows_empty_batch() {
		let batch = parse_rows("[]").unwrap();
		assert!(batch.is_empty());
		assert_eq!(batch.arity(), 0);
	}

	#[test]
	fn test_parse_rows_rejects_ragged_batch() {
		let err = parse_rows(r#"[["1","a"],["2"]]"#).unwrap_err();
		assert_eq!(err.to_string(), "malformed payload: row 1 has 1 values, expected 2 from the first row");
	}

	#[test]
	fn test_parse_rows_rejects_non_scalar_values() {
		assert!(parse_rows(r#"[["1",null]]"#).is_err());
		assert!(parse_rows(r#"[["1",["nested"]]]"#).is_err());
		assert!(parse_rows(r#"[["1",{"k":"v"}]]"#).is_err());
	}
}
