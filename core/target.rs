use crate::{error::Error, kinds::ProblemType};
use ndarray::prelude::*;
use podium_dataframe::Column;

/// The target column, decoded according to the problem type.
#[derive(Clone, Debug)]
pub enum Target {
	Classification {
		labels: Array1<usize>,
		classes: Vec<String>,
	},
	Regression {
		values: Array1<f32>,
	},
}

impl Target {
	pub fn from_column(column: &Column, problem_type: ProblemType) -> Result<Target, Error> {
		match (problem_type, column) {
			(ProblemType::Classification, Column::Enum(column)) => Ok(Target::Classification {
				labels: Array1::from(column.data.clone()),
				classes: column.options.clone(),
			}),
			(ProblemType::Classification, Column::Number(column)) => {
				if column.data.iter().any(|value| !value.is_finite()) {
					return Err(Error::InvalidDataset(format!(
						"target column \"{}\" holds non-finite values",
						column.name
					)));
				}
				// Treat each distinct value as a class.
				let mut distinct: Vec<f32> = column.data.clone();
				distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
				distinct.dedup();
				let labels = column
					.data
					.iter()
					.map(|value| {
						distinct
							.iter()
							.position(|distinct_value| distinct_value == value)
							.unwrap_or(0)
					})
					.collect::<Array1<usize>>();
				let classes = distinct.iter().map(|value| value.to_string()).collect();
				Ok(Target::Classification { labels, classes })
			}
			(ProblemType::Regression, Column::Number(column)) => Ok(Target::Regression {
				values: Array1::from(column.data.clone()),
			}),
			(ProblemType::Regression, Column::Enum(column)) => Err(Error::InvalidDataset(format!(
				"target column \"{}\" is not numeric",
				column.name
			))),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Target::Classification { labels, .. } => labels.len(),
			Target::Regression { values } => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn n_classes(&self) -> Option<usize> {
		match self {
			Target::Classification { classes, .. } => Some(classes.len()),
			Target::Regression { .. } => None,
		}
	}

	/// Returns a new target holding the rows at `indices`.
	pub fn select(&self, indices: &[usize]) -> Target {
		match self {
			Target::Classification { labels, classes } => Target::Classification {
				labels: indices.iter().map(|i| labels[*i]).collect(),
				classes: classes.clone(),
			},
			Target::Regression { values } => Target::Regression {
				values: indices.iter().map(|i| values[*i]).collect(),
			},
		}
	}
}
