use crate::{
	error::Error,
	kinds::{ModelKind, ProblemType},
	model::TrainedModel,
	params::{ParamValue, Params},
	target::Target,
};
use ndarray::prelude::*;

/// The models evaluated when the caller does not name any.
pub fn default_model_kinds(problem_type: ProblemType) -> Vec<ModelKind> {
	match problem_type {
		ProblemType::Classification => vec![
			ModelKind::DecisionTreeClassifier,
			ModelKind::GaussianNaiveBayes,
			ModelKind::KNearestNeighborsClassifier,
			ModelKind::LogisticRegression,
			ModelKind::RandomForestClassifier,
			ModelKind::SupportVectorClassifier,
		],
		ProblemType::Regression => vec![
			ModelKind::DecisionTreeRegressor,
			ModelKind::KNearestNeighborsRegressor,
			ModelKind::LinearRegression,
			ModelKind::RandomForestRegressor,
			ModelKind::SupportVectorRegressor,
		],
	}
}

/// The hyperparameters used for the baseline fit of each model.
pub fn default_params(kind: ModelKind) -> Params {
	let mut params = Params::new();
	match kind {
		ModelKind::LinearRegression | ModelKind::LogisticRegression => {
			params.insert("learning_rate".to_owned(), ParamValue::Float(0.1));
			params.insert("l2_regularization".to_owned(), ParamValue::Float(0.0));
			params.insert("max_epochs".to_owned(), ParamValue::Int(100));
			params.insert("n_examples_per_batch".to_owned(), ParamValue::Int(32));
		}
		ModelKind::SupportVectorClassifier => {
			params.insert("learning_rate".to_owned(), ParamValue::Float(0.1));
			params.insert("l2_regularization".to_owned(), ParamValue::Float(0.001));
			params.insert("max_epochs".to_owned(), ParamValue::Int(100));
			params.insert("n_examples_per_batch".to_owned(), ParamValue::Int(32));
		}
		ModelKind::SupportVectorRegressor => {
			params.insert("learning_rate".to_owned(), ParamValue::Float(0.1));
			params.insert("l2_regularization".to_owned(), ParamValue::Float(0.001));
			params.insert("max_epochs".to_owned(), ParamValue::Int(100));
			params.insert("n_examples_per_batch".to_owned(), ParamValue::Int(32));
			params.insert("epsilon".to_owned(), ParamValue::Float(0.1));
		}
		ModelKind::DecisionTreeClassifier | ModelKind::DecisionTreeRegressor => {
			params.insert("min_examples_per_leaf".to_owned(), ParamValue::Int(1));
		}
		ModelKind::RandomForestClassifier | ModelKind::RandomForestRegressor => {
			params.insert("n_trees".to_owned(), ParamValue::Int(100));
			params.insert("min_examples_per_leaf".to_owned(), ParamValue::Int(1));
		}
		ModelKind::KNearestNeighborsClassifier | ModelKind::KNearestNeighborsRegressor => {
			params.insert("n_neighbors".to_owned(), ParamValue::Int(5));
		}
		ModelKind::GaussianNaiveBayes => {
			params.insert("variance_smoothing".to_owned(), ParamValue::Float(1e-9));
		}
	}
	params
}

fn f32_param(params: &Params, name: &str, default: f32) -> f32 {
	params
		.get(name)
		.and_then(|value| value.as_f32())
		.unwrap_or(default)
}

fn usize_param(params: &Params, name: &str, default: usize) -> usize {
	params
		.get(name)
		.and_then(|value| value.as_usize())
		.unwrap_or(default)
}

fn linear_options(params: &Params) -> podium_linear::TrainOptions {
	let defaults = podium_linear::TrainOptions::default();
	podium_linear::TrainOptions {
		learning_rate: f32_param(params, "learning_rate", defaults.learning_rate),
		l2_regularization: f32_param(params, "l2_regularization", defaults.l2_regularization),
		max_epochs: usize_param(params, "max_epochs", defaults.max_epochs),
		n_examples_per_batch: usize_param(
			params,
			"n_examples_per_batch",
			defaults.n_examples_per_batch,
		),
	}
}

fn tree_options(params: &Params) -> podium_tree::TreeTrainOptions {
	let defaults = podium_tree::TreeTrainOptions::default();
	let min_examples_per_leaf =
		usize_param(params, "min_examples_per_leaf", defaults.min_examples_per_leaf);
	podium_tree::TreeTrainOptions {
		max_depth: params.get("max_depth").and_then(|value| value.as_usize()),
		min_examples_per_leaf,
		min_examples_to_split: min_examples_per_leaf.max(1) * 2,
		max_features: None,
		seed: defaults.seed,
	}
}

fn forest_options(params: &Params) -> podium_tree::ForestTrainOptions {
	let defaults = podium_tree::ForestTrainOptions::default();
	podium_tree::ForestTrainOptions {
		n_trees: usize_param(params, "n_trees", defaults.n_trees),
		max_depth: params.get("max_depth").and_then(|value| value.as_usize()),
		min_examples_per_leaf: usize_param(
			params,
			"min_examples_per_leaf",
			defaults.min_examples_per_leaf,
		),
		max_features: None,
		seed: defaults.seed,
	}
}

fn neighbors_options(params: &Params) -> podium_neighbors::NeighborsTrainOptions {
	let defaults = podium_neighbors::NeighborsTrainOptions::default();
	podium_neighbors::NeighborsTrainOptions {
		n_neighbors: usize_param(params, "n_neighbors", defaults.n_neighbors),
	}
}

/// Fit a model of `kind` on `features` and `target` with `params`. Any
/// hyperparameter missing from `params` falls back to the learner's default.
pub fn fit(
	kind: ModelKind,
	params: &Params,
	features: ArrayView2<f32>,
	target: &Target,
) -> Result<TrainedModel, Error> {
	match (kind, target) {
		(ModelKind::LogisticRegression, Target::Classification { labels, classes }) => {
			let options = linear_options(params);
			if classes.len() <= 2 {
				Ok(TrainedModel::BinaryClassifier(
					podium_linear::BinaryClassifier::train(features, labels.view(), &options),
				))
			} else {
				Ok(TrainedModel::MulticlassClassifier(
					podium_linear::MulticlassClassifier::train(
						features,
						labels.view(),
						classes.len(),
						&options,
					),
				))
			}
		}
		(ModelKind::SupportVectorClassifier, Target::Classification { labels, classes }) => {
			if classes.len() > 2 {
				return Err(Error::FitFailed {
					model: kind.as_str(),
					message: format!(
						"only two-class targets are supported, found {} classes",
						classes.len()
					),
				});
			}
			let options = linear_options(params);
			Ok(TrainedModel::SupportVectorClassifier(
				podium_linear::SupportVectorClassifier::train(features, labels.view(), &options),
			))
		}
		(ModelKind::LinearRegression, Target::Regression { values }) => {
			let options = linear_options(params);
			Ok(TrainedModel::LinearRegressor(
				podium_linear::Regressor::train(features, values.view(), &options),
			))
		}
		(ModelKind::SupportVectorRegressor, Target::Regression { values }) => {
			let defaults = podium_linear::SvrTrainOptions::default();
			let options = podium_linear::SvrTrainOptions {
				epsilon: f32_param(params, "epsilon", defaults.epsilon),
				train: linear_options(params),
			};
			Ok(TrainedModel::SupportVectorRegressor(
				podium_linear::SupportVectorRegressor::train(features, values.view(), &options),
			))
		}
		(ModelKind::DecisionTreeClassifier, Target::Classification { labels, classes }) => {
			let options = tree_options(params);
			Ok(TrainedModel::TreeClassifier(
				podium_tree::TreeClassifier::train(
					features,
					labels.view(),
					classes.len(),
					&options,
				),
			))
		}
		(ModelKind::DecisionTreeRegressor, Target::Regression { values }) => {
			let options = tree_options(params);
			Ok(TrainedModel::TreeRegressor(
				podium_tree::TreeRegressor::train(features, values.view(), &options),
			))
		}
		(ModelKind::RandomForestClassifier, Target::Classification { labels, classes }) => {
			let options = forest_options(params);
			Ok(TrainedModel::ForestClassifier(
				podium_tree::ForestClassifier::train(
					features,
					labels.view(),
					classes.len(),
					&options,
				),
			))
		}
		(ModelKind::RandomForestRegressor, Target::Regression { values }) => {
			let options = forest_options(params);
			Ok(TrainedModel::ForestRegressor(
				podium_tree::ForestRegressor::train(features, values.view(), &options),
			))
		}
		(ModelKind::KNearestNeighborsClassifier, Target::Classification { labels, classes }) => {
			let options = neighbors_options(params);
			Ok(TrainedModel::KNeighborsClassifier(
				podium_neighbors::KNeighborsClassifier::train(
					features,
					labels.view(),
					classes.len(),
					&options,
				),
			))
		}
		(ModelKind::KNearestNeighborsRegressor, Target::Regression { values }) => {
			let options = neighbors_options(params);
			Ok(TrainedModel::KNeighborsRegressor(
				podium_neighbors::KNeighborsRegressor::train(features, values.view(), &options),
			))
		}
		(ModelKind::GaussianNaiveBayes, Target::Classification { labels, classes }) => {
			let defaults = podium_bayes::BayesTrainOptions::default();
			let options = podium_bayes::BayesTrainOptions {
				variance_smoothing: f32_param(
					params,
					"variance_smoothing",
					defaults.variance_smoothing,
				),
			};
			Ok(TrainedModel::GaussianNaiveBayes(
				podium_bayes::GaussianNaiveBayes::train(
					features,
					labels.view(),
					classes.len(),
					&options,
				),
			))
		}
		_ => Err(Error::FitFailed {
			model: kind.as_str(),
			message: format!(
				"expected a {} target",
				kind.problem_type()
			),
		}),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_default_model_kinds_match_problem_type() {
		for kind in default_model_kinds(ProblemType::Classification) {
			assert_eq!(kind.problem_type(), ProblemType::Classification);
		}
		for kind in default_model_kinds(ProblemType::Regression) {
			assert_eq!(kind.problem_type(), ProblemType::Regression);
		}
	}

	#[test]
	fn test_fit_rejects_multiclass_svc() {
		let features = arr2(&[[0.0], [1.0], [2.0]]);
		let target = Target::Classification {
			labels: arr1(&[0, 1, 2]),
			classes: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
		};
		let result = fit(
			ModelKind::SupportVectorClassifier,
			&default_params(ModelKind::SupportVectorClassifier),
			features.view(),
			&target,
		);
		assert!(matches!(result, Err(Error::FitFailed { .. })));
	}

	#[test]
	fn test_fit_rejects_mismatched_target() {
		let features = arr2(&[[0.0], [1.0]]);
		let target = Target::Regression {
			values: arr1(&[0.0, 1.0]),
		};
		let result = fit(
			ModelKind::LogisticRegression,
			&default_params(ModelKind::LogisticRegression),
			features.view(),
			&target,
		);
		assert!(matches!(result, Err(Error::FitFailed { .. })));
	}
}
