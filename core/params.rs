use serde::Serialize;
use std::collections::BTreeMap;

/// A named set of hyperparameter values.
pub type Params = BTreeMap<String, ParamValue>;

/// A single hyperparameter value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
	Int(u64),
	Float(f32),
}

impl ParamValue {
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			ParamValue::Int(value) => Some(*value),
			ParamValue::Float(_) => None,
		}
	}

	pub fn as_usize(&self) -> Option<usize> {
		self.as_u64().map(|value| value as usize)
	}

	pub fn as_f32(&self) -> Option<f32> {
		match self {
			ParamValue::Int(value) => Some(*value as f32),
			ParamValue::Float(value) => Some(*value),
		}
	}
}

impl std::fmt::Display for ParamValue {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			ParamValue::Int(value) => write!(f, "{}", value),
			ParamValue::Float(value) => write!(f, "{}", value),
		}
	}
}
