// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Value;

/// Parameters bound to the `?` placeholders of a statement, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Params {
	#[default]
	None,
	Positional(Vec<Value>),
}

impl Params {
	pub fn get_positional(&self, index: usize) -> Option<&Value> {
		match self {
			Params::Positional(values) => values.get(index),
			_ => None,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Params::None => 0,
			Params::Positional(values) => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn empty() -> Params {
		Params::None
	}
}

impl From<()> for Params {
	fn from(_: ()) -> Self {
		Params::None
	}
}

impl From<Vec<Value>> for Params {
	fn from(values: Vec<Value>) -> Self {
		Params::Positional(values)
	}
}

impl<const N: usize> From<[Value; N]> for Params {
	fn from(values: [Value; N]) -> Self {
		Params::Positional(values.to_vec())
	}
}

#[macro_export]
macro_rules! params {
    // Empty params
    () => {
        $crate::Params::None
    };

    // Empty positional parameters
    [] => {
        $crate::Params::None
    };

    // Positional parameters: params![value1, value2, ...]
    [ $($value:expr),+ $(,)? ] => {
        {
            let values = vec![
                $($crate::Value::from($value)),*
            ];
            $crate::Params::Positional(values)
        }
    };
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_params_macro_positional() {
		let params = params![42i64, "hello"];
		match params {
			Params::Positional(values) => {
				assert_eq!(values.len(), 2);
				assert_eq!(values[0], Value::Int8(42));
				assert_eq!(values[1], Value::Utf8("hello".to_string()));
			}
			_ => panic!("Expected positional params"),
		}
	}

	#[test]
	fn test_params_macro_empty() {
		let params = params!();
		assert_eq!(params, Params::None);

		let params2 = params![];
		assert_eq!(params2, Params::None);
	}

	#[test]
	fn test_params_macro_with_values() {
		let v1 = Value::Int8(100);
		let v2 = Value::from("two");

		let params = params![v1, v2, 300i64];
		match params {
			Params::Positional(values) => {
				assert_eq!(values.len(), 3);
				assert_eq!(values[0], Value::Int8(100));
				assert_eq!(values[1], Value::Utf8("two".to_string()));
				assert_eq!(values[2], Value::Int8(300));
			}
			_ => panic!("Expected positional params"),
		}
	}

	#[test]
	fn test_params_macro_trailing_comma() {
		let params = params![1i64, 2i64, 3i64,];
		match params {
			Params::Positional(values) => {
				assert_eq!(values.len(), 3)
			}
			_ => panic!("Expected positional params"),
		}
	}

	#[test]
	fn test_get_positional() {
		let params = Params::from(vec![Value::Int8(1), Value::Utf8("a".to_string())]);
		assert_eq!(params.get_positional(0), Some(&Value::Int8(1)));
		assert_eq!(params.get_positional(1), Some(&Value::Utf8("a".to_string())));
		assert_eq!(params.get_positional(2), None);
		assert_eq!(Params::None.get_positional(0), None);
	}

	#[test]
	fn test_len() {
		assert_eq!(Params::empty().len(), 0);
		assert!(Params::empty().is_empty());

		let params = Params::from([Value::Int8(1)]);
		assert_eq!(params.len(), 1);
		assert!(!params.is_empty());
	}
}
