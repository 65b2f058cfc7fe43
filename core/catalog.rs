use crate::{
	kinds::ModelKind,
	params::{ParamValue, Params},
};
use itertools::Itertools;

/// One hyperparameter axis of a grid search.
#[derive(Clone, Debug)]
pub struct SearchAxis {
	pub name: &'static str,
	pub values: Vec<ParamValue>,
}

/// The full grid searched when tuning a model.
#[derive(Clone, Debug)]
pub struct SearchSpace {
	pub axes: Vec<SearchAxis>,
}

/// Returns the search space for `kind`, or `None` if the model has no
/// tunable hyperparameters.
pub fn search_space(kind: ModelKind) -> Option<SearchSpace> {
	let axes = match kind {
		ModelKind::LinearRegression | ModelKind::LogisticRegression => vec![
			SearchAxis {
				name: "learning_rate",
				values: vec![ParamValue::Float(0.1), ParamValue::Float(0.01)],
			},
			SearchAxis {
				name: "l2_regularization",
				values: vec![
					ParamValue::Float(0.0),
					ParamValue::Float(0.1),
					ParamValue::Float(1.0),
				],
			},
			SearchAxis {
				name: "max_epochs",
				values: vec![ParamValue::Int(100)],
			},
		],
		ModelKind::SupportVectorClassifier => vec![
			SearchAxis {
				name: "learning_rate",
				values: vec![ParamValue::Float(0.1), ParamValue::Float(0.01)],
			},
			SearchAxis {
				name: "l2_regularization",
				values: vec![
					ParamValue::Float(0.0001),
					ParamValue::Float(0.001),
					ParamValue::Float(0.01),
				],
			},
		],
		ModelKind::SupportVectorRegressor => vec![
			SearchAxis {
				name: "learning_rate",
				values: vec![ParamValue::Float(0.1), ParamValue::Float(0.01)],
			},
			SearchAxis {
				name: "l2_regularization",
				values: vec![
					ParamValue::Float(0.0001),
					ParamValue::Float(0.001),
					ParamValue::Float(0.01),
				],
			},
			SearchAxis {
				name: "epsilon",
				values: vec![ParamValue::Float(0.01), ParamValue::Float(0.1)],
			},
		],
		ModelKind::DecisionTreeClassifier | ModelKind::DecisionTreeRegressor => vec![
			SearchAxis {
				name: "max_depth",
				values: vec![
					ParamValue::Int(3),
					ParamValue::Int(6),
					ParamValue::Int(9),
					ParamValue::Int(12),
				],
			},
			SearchAxis {
				name: "min_examples_per_leaf",
				values: vec![ParamValue::Int(1), ParamValue::Int(5), ParamValue::Int(10)],
			},
		],
		ModelKind::RandomForestClassifier | ModelKind::RandomForestRegressor => vec![
			SearchAxis {
				name: "n_trees",
				values: vec![ParamValue::Int(25), ParamValue::Int(50), ParamValue::Int(100)],
			},
			SearchAxis {
				name: "max_depth",
				values: vec![ParamValue::Int(6), ParamValue::Int(9)],
			},
			SearchAxis {
				name: "min_examples_per_leaf",
				values: vec![ParamValue::Int(1), ParamValue::Int(5)],
			},
		],
		ModelKind::KNearestNeighborsClassifier | ModelKind::KNearestNeighborsRegressor => {
			vec![SearchAxis {
				name: "n_neighbors",
				values: vec![
					ParamValue::Int(3),
					ParamValue::Int(5),
					ParamValue::Int(7),
					ParamValue::Int(9),
				],
			}]
		}
		ModelKind::GaussianNaiveBayes => return None,
	};
	Some(SearchSpace { axes })
}

/// Expands a search space into the cartesian product of its axis values.
pub fn expand(space: &SearchSpace) -> Vec<Params> {
	space
		.axes
		.iter()
		.map(|axis| axis.values.iter().map(move |value| (axis.name, *value)))
		.multi_cartesian_product()
		.map(|combination| {
			combination
				.into_iter()
				.map(|(name, value)| (name.to_owned(), value))
				.collect()
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_expand_is_cartesian_product() {
		let space = search_space(ModelKind::DecisionTreeClassifier).unwrap();
		let grid = expand(&space);
		assert_eq!(grid.len(), 4 * 3);
		for params in grid.iter() {
			assert!(params.contains_key("max_depth"));
			assert!(params.contains_key("min_examples_per_leaf"));
		}
	}

	#[test]
	fn test_expanded_candidates_are_distinct() {
		let space = search_space(ModelKind::RandomForestRegressor).unwrap();
		let grid = expand(&space);
		assert_eq!(grid.len(), 3 * 2 * 2);
		for i in 0..grid.len() {
			for j in i + 1..grid.len() {
				assert_ne!(grid[i], grid[j]);
			}
		}
	}

	#[test]
	fn test_gaussian_naive_bayes_has_no_search_space() {
		assert!(search_space(ModelKind::GaussianNaiveBayes).is_none());
	}
}
