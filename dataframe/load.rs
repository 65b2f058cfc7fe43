use crate::{Column, EnumColumn, NumberColumn, Table};
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FromCsvError {
	#[error("csv error: {0}")]
	Csv(#[from] csv::Error),
	#[error("the csv file has no header row")]
	MissingHeader,
	#[error("row {row} has {found} fields but the header has {expected}")]
	RaggedRow {
		row: usize,
		found: usize,
		expected: usize,
	},
}

/// Load a [`Table`](../struct.Table.html) from csv. Each column's type is inferred: if every value in the column parses as a number the column is numeric, otherwise it is categorical with its options collected in order of first appearance.
pub fn from_csv(reader: &mut csv::Reader<impl Read>) -> Result<Table, FromCsvError> {
	let header = reader.headers()?.clone();
	if header.is_empty() {
		return Err(FromCsvError::MissingHeader);
	}
	let column_names: Vec<String> = header.iter().map(|name| name.to_owned()).collect();
	let mut cells: Vec<Vec<String>> = vec![Vec::new(); column_names.len()];
	for (row_index, record) in reader.records().enumerate() {
		let record = record?;
		if record.len() != column_names.len() {
			return Err(FromCsvError::RaggedRow {
				row: row_index + 1,
				found: record.len(),
				expected: column_names.len(),
			});
		}
		for (column, value) in cells.iter_mut().zip(record.iter()) {
			column.push(value.to_owned());
		}
	}
	let columns = column_names
		.into_iter()
		.zip(cells.into_iter())
		.map(|(name, values)| infer_column(name, values))
		.collect();
	Ok(Table::new(columns))
}

fn infer_column(name: String, values: Vec<String>) -> Column {
	let numbers: Option<Vec<f32>> = values
		.iter()
		.map(|value| value.trim().parse::<f32>().ok())
		.collect();
	match numbers {
		Some(data) => Column::Number(NumberColumn { name, data }),
		None => {
			let mut options: Vec<String> = Vec::new();
			let data = values
				.into_iter()
				.map(|value| match options.iter().position(|option| *option == value) {
					Some(index) => index,
					None => {
						options.push(value);
						options.len() - 1
					}
				})
				.collect();
			Column::Enum(EnumColumn {
				name,
				options,
				data,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_infer() {
		let csv = "size,label\n1.5,cat\n2.5,dog\n3.5,cat\n";
		let mut reader = csv::Reader::from_reader(std::io::Cursor::new(csv));
		let table = from_csv(&mut reader).unwrap();
		assert_eq!(table.nrows(), 3);
		let size = table.column("size").unwrap().as_number().unwrap();
		assert_eq!(size.data, vec![1.5, 2.5, 3.5]);
		let label = table.column("label").unwrap().as_enum().unwrap();
		assert_eq!(label.options, vec!["cat".to_owned(), "dog".to_owned()]);
		assert_eq!(label.data, vec![0, 1, 0]);
	}

	#[test]
	fn test_ragged_row() {
		let csv = "a,b\n1,2\n3\n";
		let mut reader = csv::Reader::from_reader(std::io::Cursor::new(csv));
		assert!(from_csv(&mut reader).is_err());
	}
}
