use crate::{
	catalog,
	cv::cross_validate,
	error::Error,
	kinds::ModelKind,
	model::TrainedModel,
	params::Params,
	registry,
	target::Target,
};
use ndarray::prelude::*;
use rayon::prelude::*;

/// Controls when and how an under-performing model is tuned.
#[derive(Clone, Copy, Debug)]
pub struct TuningOptions {
	/// Baseline test scores below this trigger a grid search.
	pub threshold: f32,
	/// The number of cross validation folds scored for each candidate.
	pub n_folds: usize,
}

/// The result of evaluating one model kind.
#[derive(Debug)]
pub struct Evaluation {
	pub kind: ModelKind,
	pub model: TrainedModel,
	pub score: f32,
	pub params: Params,
}

/// Fit `kind` with its default hyperparameters, score it on the test set, and
/// grid-search it if tuning is enabled and the baseline score falls below the
/// threshold. The tuned model replaces the baseline only when it scores
/// strictly higher on the test set.
pub fn evaluate_model(
	kind: ModelKind,
	train_features: ArrayView2<f32>,
	train_target: &Target,
	test_features: ArrayView2<f32>,
	test_target: &Target,
	tuning: Option<TuningOptions>,
) -> Result<Evaluation, Error> {
	let baseline_params = registry::default_params(kind);
	let baseline_model = registry::fit(kind, &baseline_params, train_features, train_target)?;
	let baseline_score = baseline_model.score(test_features, test_target);
	let mut evaluation = Evaluation {
		kind,
		model: baseline_model,
		score: baseline_score,
		params: baseline_params,
	};
	let tuning = match tuning {
		Some(tuning) if baseline_score < tuning.threshold => tuning,
		_ => return Ok(evaluation),
	};
	let space = catalog::search_space(kind).ok_or(Error::UnsupportedTuning(kind.as_str()))?;
	let mut candidates = catalog::expand(&space);
	let cv_scores = candidates
		.par_iter()
		.map(|candidate| {
			cross_validate(kind, candidate, train_features, train_target, tuning.n_folds)
		})
		.collect::<Result<Vec<f32>, Error>>()?;
	let mut best: Option<(usize, f32)> = None;
	for (candidate_index, cv_score) in cv_scores.iter().enumerate() {
		match best {
			Some((_, best_score)) if *cv_score <= best_score => {}
			_ => best = Some((candidate_index, *cv_score)),
		}
	}
	let (best_index, _) = best.ok_or(Error::NoResults)?;
	let tuned_params = candidates.swap_remove(best_index);
	let tuned_model = registry::fit(kind, &tuned_params, train_features, train_target)?;
	let tuned_score = tuned_model.score(test_features, test_target);
	if tuned_score > evaluation.score {
		evaluation.model = tuned_model;
		evaluation.score = tuned_score;
		evaluation.params = tuned_params;
	}
	Ok(evaluation)
}

#[cfg(test)]
mod test {
	use super::*;

	fn separable_dataset() -> (Array2<f32>, Target) {
		let mut values = Vec::new();
		let mut labels = Vec::new();
		for i in 0..20 {
			values.push(i as f32 * 0.01);
			labels.push(0);
		}
		for i in 0..20 {
			values.push(10.0 + i as f32 * 0.01);
			labels.push(1);
		}
		let features = Array2::from_shape_vec((40, 1), values).unwrap();
		let target = Target::Classification {
			labels: Array1::from(labels),
			classes: vec!["a".to_owned(), "b".to_owned()],
		};
		(features, target)
	}

	#[test]
	fn test_baseline_only_when_above_threshold() {
		let (features, target) = separable_dataset();
		let evaluation = evaluate_model(
			ModelKind::KNearestNeighborsClassifier,
			features.view(),
			&target,
			features.view(),
			&target,
			Some(TuningOptions {
				threshold: 0.0,
				n_folds: 5,
			}),
		)
		.unwrap();
		let defaults = registry::default_params(ModelKind::KNearestNeighborsClassifier);
		assert_eq!(evaluation.params, defaults);
	}

	#[test]
	fn test_tuning_never_lowers_the_score() {
		let (features, target) = separable_dataset();
		let untuned = evaluate_model(
			ModelKind::DecisionTreeClassifier,
			features.view(),
			&target,
			features.view(),
			&target,
			None,
		)
		.unwrap();
		let tuned = evaluate_model(
			ModelKind::DecisionTreeClassifier,
			features.view(),
			&target,
			features.view(),
			&target,
			Some(TuningOptions {
				threshold: 1.1,
				n_folds: 5,
			}),
		)
		.unwrap();
		assert!(tuned.score >= untuned.score);
	}

	#[test]
	fn test_tuning_a_model_without_a_search_space_fails() {
		let (features, target) = separable_dataset();
		let result = evaluate_model(
			ModelKind::GaussianNaiveBayes,
			features.view(),
			&target,
			features.view(),
			&target,
			Some(TuningOptions {
				threshold: 1.1,
				n_folds: 5,
			}),
		);
		assert!(matches!(result, Err(Error::UnsupportedTuning(_))));
	}
}
