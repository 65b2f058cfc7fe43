/*!
This crate provides a minimal tabular container for podium. A [`Table`](struct.Table.html) is a collection of named columns, each of which holds either numbers or categorical values. It implements just the features the model-selection pipeline needs: loading from csv with type inference and conversion of numeric columns into an `ndarray` feature matrix.
*/

use ndarray::prelude::*;

pub mod load;

pub use self::load::{from_csv, FromCsvError};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
	Number(NumberColumn),
	Enum(EnumColumn),
}

/// A column of `f32` values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f32>,
}

/// A categorical column. `data` holds indexes into `options`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
	pub data: Vec<usize>,
}

impl Table {
	pub fn new(columns: Vec<Column>) -> Self {
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	pub fn column_names(&self) -> Vec<&str> {
		self.columns.iter().map(|column| column.name()).collect()
	}

	pub fn column(&self, name: &str) -> Option<&Column> {
		self.columns.iter().find(|column| column.name() == name)
	}

	/// Assemble every numeric column except `exclude` into a row-major feature matrix. Returns `None` if any remaining column is categorical.
	pub fn to_feature_matrix(&self, exclude: &str) -> Option<Array2<f32>> {
		let feature_columns: Vec<&NumberColumn> = self
			.columns
			.iter()
			.filter(|column| column.name() != exclude)
			.map(|column| column.as_number())
			.collect::<Option<Vec<_>>>()?;
		let mut features = Array2::zeros((self.nrows(), feature_columns.len()));
		for (column_index, column) in feature_columns.iter().enumerate() {
			for (row_index, value) in column.data.iter().enumerate() {
				features[(row_index, column_index)] = *value;
			}
		}
		Some(features)
	}
}

impl Column {
	pub fn name(&self) -> &str {
		match self {
			Column::Number(column) => &column.name,
			Column::Enum(column) => &column.name,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Column::Number(column) => column.data.len(),
			Column::Enum(column) => column.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn as_number(&self) -> Option<&NumberColumn> {
		match self {
			Column::Number(column) => Some(column),
			_ => None,
		}
	}

	pub fn as_enum(&self) -> Option<&EnumColumn> {
		match self {
			Column::Enum(column) => Some(column),
			_ => None,
		}
	}
}

impl NumberColumn {
	pub fn new(name: impl Into<String>, data: Vec<f32>) -> Self {
		Self {
			name: name.into(),
			data,
		}
	}
}

impl EnumColumn {
	pub fn new(name: impl Into<String>, options: Vec<String>, data: Vec<usize>) -> Self {
		Self {
			name: name.into(),
			options,
			data,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_table() -> Table {
		Table::new(vec![
			Column::Number(NumberColumn::new("a", vec![1.0, 2.0, 3.0])),
			Column::Number(NumberColumn::new("b", vec![4.0, 5.0, 6.0])),
			Column::Number(NumberColumn::new("target", vec![0.0, 1.0, 0.0])),
		])
	}

	#[test]
	fn test_feature_matrix_excludes_target() {
		let table = test_table();
		let features = table.to_feature_matrix("target").unwrap();
		assert_eq!(features.dim(), (3, 2));
		assert_eq!(features[(1, 0)], 2.0);
		assert_eq!(features[(1, 1)], 5.0);
	}

	#[test]
	fn test_feature_matrix_rejects_enum_features() {
		let table = Table::new(vec![
			Column::Enum(EnumColumn::new(
				"color",
				vec!["red".to_owned(), "blue".to_owned()],
				vec![0, 1],
			)),
			Column::Number(NumberColumn::new("target", vec![0.0, 1.0])),
		]);
		assert!(table.to_feature_matrix("target").is_none());
	}

	#[test]
	fn test_column_lookup() {
		let table = test_table();
		assert_eq!(table.column("b").unwrap().name(), "b");
		assert!(table.column("missing").is_none());
	}
}
