use crate::{
	config::Config,
	error::Error,
	evaluate::{evaluate_model, Evaluation, TuningOptions},
	kinds::{ModelKind, ProblemType},
	model::TrainedModel,
	params::Params,
	progress::{Progress, ProgressCounter},
	registry,
	split::train_test_split,
	target::Target,
};
use ndarray::prelude::*;
use podium_dataframe::Table;
use rayon::prelude::*;

/// The winning model of a training run.
#[derive(Debug)]
pub struct TrainOutput {
	pub kind: ModelKind,
	pub model: TrainedModel,
	pub score: f32,
	pub params: Params,
}

/// Train every model in the resolved set on a shuffled train/test split of
/// `table` and return the one with the highest test score.
pub fn train(
	table: &Table,
	config: &Config,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<TrainOutput, Error> {
	let problem_type = ProblemType::parse(&config.problem_type)?;
	let kinds = resolve_model_kinds(config, problem_type)?;
	let target_column = table.column(&config.target).ok_or_else(|| {
		Error::InvalidDataset(format!("did not find target column \"{}\"", config.target))
	})?;
	let target = Target::from_column(target_column, problem_type)?;
	let features = table.to_feature_matrix(&config.target).ok_or_else(|| {
		Error::InvalidDataset("the feature columns are not all numeric".to_owned())
	})?;
	if features.ncols() == 0 {
		return Err(Error::InvalidDataset(
			"the table has no feature columns".to_owned(),
		));
	}
	let n_rows = features.nrows();
	if n_rows < 2 {
		return Err(Error::InvalidDataset(
			"at least two rows are required to split".to_owned(),
		));
	}
	if !(config.test_fraction > 0.0 && config.test_fraction < 1.0) {
		return Err(Error::InvalidDataset(format!(
			"test fraction {} is not between zero and one",
			config.test_fraction
		)));
	}
	update_progress(Progress::Splitting);
	let split = train_test_split(n_rows, config.test_fraction, config.split_seed);
	let train_features = features.select(Axis(0), &split.train_indices);
	let train_target = target.select(&split.train_indices);
	let test_features = features.select(Axis(0), &split.test_indices);
	let test_target = target.select(&split.test_indices);
	let tuning = if config.hyperparameter_tuning {
		Some(TuningOptions {
			threshold: config.hyperparameter_tuning_threshold,
			n_folds: config.n_folds,
		})
	} else {
		None
	};
	let counter = ProgressCounter::new(kinds.len() as u64);
	update_progress(Progress::Evaluating(counter.clone()));
	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(config.n_workers.unwrap_or(0))
		.build()?;
	let evaluations = pool.install(|| {
		kinds
			.par_iter()
			.map(|kind| {
				let evaluation = evaluate_model(
					*kind,
					train_features.view(),
					&train_target,
					test_features.view(),
					&test_target,
					tuning,
				)?;
				counter.inc(1);
				Ok(evaluation)
			})
			.collect::<Result<Vec<Evaluation>, Error>>()
	})?;
	let best = choose_best(evaluations)?;
	Ok(TrainOutput {
		kind: best.kind,
		model: best.model,
		score: best.score,
		params: best.params,
	})
}

/// The model identifiers to evaluate: the configured set, or every registered
/// model for the problem type, minus the exclusions. The result is sorted by
/// identifier so ties later resolve the same way on every run.
fn resolve_model_kinds(
	config: &Config,
	problem_type: ProblemType,
) -> Result<Vec<ModelKind>, Error> {
	let mut kinds = match &config.models {
		Some(names) => names
			.iter()
			.map(|name| parse_kind_for(name, problem_type))
			.collect::<Result<Vec<ModelKind>, Error>>()?,
		None => registry::default_model_kinds(problem_type),
	};
	for name in config.excluded_models.iter() {
		let excluded = parse_kind_for(name, problem_type)?;
		kinds.retain(|kind| *kind != excluded);
	}
	kinds.sort_by_key(|kind| kind.as_str());
	kinds.dedup();
	if kinds.is_empty() {
		return Err(Error::EmptyModelSet);
	}
	Ok(kinds)
}

fn parse_kind_for(name: &str, problem_type: ProblemType) -> Result<ModelKind, Error> {
	match ModelKind::from_str(name) {
		Some(kind) if kind.problem_type() == problem_type => Ok(kind),
		_ => Err(Error::UnknownModel(name.to_owned())),
	}
}

/// The evaluation with the highest score. Ties go to the evaluation that
/// appears first, which is the first in identifier order because the model set
/// is sorted before evaluation.
fn choose_best(evaluations: Vec<Evaluation>) -> Result<Evaluation, Error> {
	let mut best: Option<Evaluation> = None;
	for evaluation in evaluations {
		match &best {
			Some(current) if evaluation.score <= current.score => {}
			_ => best = Some(evaluation),
		}
	}
	best.ok_or(Error::NoResults)
}

#[cfg(test)]
mod test {
	use super::*;
	use podium_dataframe::{Column, EnumColumn, NumberColumn};
	use std::collections::BTreeSet;

	fn classification_table(n_per_class: usize) -> Table {
		let mut x = Vec::new();
		let mut y = Vec::new();
		let mut labels = Vec::new();
		for i in 0..n_per_class {
			x.push(i as f32 * 0.01);
			y.push(1.0 + i as f32 * 0.01);
			labels.push(0);
			x.push(10.0 + i as f32 * 0.01);
			y.push(-5.0 + i as f32 * 0.01);
			labels.push(1);
		}
		Table {
			columns: vec![
				Column::Number(NumberColumn {
					name: "x".to_owned(),
					data: x,
				}),
				Column::Number(NumberColumn {
					name: "y".to_owned(),
					data: y,
				}),
				Column::Enum(EnumColumn {
					name: "class".to_owned(),
					options: vec!["a".to_owned(), "b".to_owned()],
					data: labels,
				}),
			],
		}
	}

	fn regression_table(n_rows: usize) -> Table {
		let x: Vec<f32> = (0..n_rows).map(|i| i as f32).collect();
		let y: Vec<f32> = x.iter().map(|x| 3.0 * x + 1.0).collect();
		Table {
			columns: vec![
				Column::Number(NumberColumn {
					name: "x".to_owned(),
					data: x,
				}),
				Column::Number(NumberColumn {
					name: "y".to_owned(),
					data: y,
				}),
			],
		}
	}

	fn run(table: &Table, config: &Config) -> Result<TrainOutput, Error> {
		train(table, config, &mut |_| {})
	}

	#[test]
	fn test_classification_run_with_defaults() {
		let table = classification_table(40);
		let config = Config::new("class");
		let output = run(&table, &config).unwrap();
		assert_eq!(output.kind.problem_type(), ProblemType::Classification);
		assert!(output.score > 0.9);
	}

	#[test]
	fn test_regression_run_with_defaults() {
		let table = regression_table(80);
		let mut config = Config::new("y");
		config.problem_type = "regression".to_owned();
		let output = run(&table, &config).unwrap();
		assert_eq!(output.kind.problem_type(), ProblemType::Regression);
		assert!(output.score > 0.5);
	}

	#[test]
	fn test_explicit_model_set() {
		let table = classification_table(40);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("decision_tree_classifier".to_owned());
		config.models = Some(models);
		let output = run(&table, &config).unwrap();
		assert_eq!(output.kind, ModelKind::DecisionTreeClassifier);
	}

	#[test]
	fn test_two_model_comparison_without_tuning() {
		let table = classification_table(50);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("logistic_regression".to_owned());
		models.insert("decision_tree_classifier".to_owned());
		config.models = Some(models);
		let output = run(&table, &config).unwrap();
		assert!(
			output.kind == ModelKind::LogisticRegression
				|| output.kind == ModelKind::DecisionTreeClassifier
		);
		assert!(output.score >= 0.0 && output.score <= 1.0);
		assert_eq!(output.params, registry::default_params(output.kind));
	}

	#[test]
	fn test_two_model_comparison_with_tuning() {
		let table = classification_table(50);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("logistic_regression".to_owned());
		models.insert("decision_tree_classifier".to_owned());
		config.models = Some(models);
		let untuned = run(&table, &config).unwrap();
		config.hyperparameter_tuning = true;
		config.hyperparameter_tuning_threshold = 1.1;
		let tuned = run(&table, &config).unwrap();
		assert!(tuned.score >= untuned.score);
	}

	#[test]
	fn test_resolution_subtracts_exclusions_from_the_defaults() {
		let mut config = Config::new("class");
		config
			.excluded_models
			.insert("support_vector_classifier".to_owned());
		let kinds = resolve_model_kinds(&config, ProblemType::Classification).unwrap();
		assert!(!kinds.contains(&ModelKind::SupportVectorClassifier));
		assert_eq!(
			kinds.len(),
			registry::default_model_kinds(ProblemType::Classification).len() - 1
		);
	}

	#[test]
	fn test_unknown_model_name() {
		let table = classification_table(10);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("quantum_forest".to_owned());
		config.models = Some(models);
		assert!(matches!(
			run(&table, &config),
			Err(Error::UnknownModel(name)) if name == "quantum_forest"
		));
	}

	#[test]
	fn test_model_from_the_wrong_problem_type() {
		let table = classification_table(10);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("linear_regression".to_owned());
		config.models = Some(models);
		assert!(matches!(run(&table, &config), Err(Error::UnknownModel(_))));
	}

	#[test]
	fn test_excluding_every_model_is_an_error() {
		let table = classification_table(10);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("gaussian_naive_bayes".to_owned());
		config.models = Some(models);
		config
			.excluded_models
			.insert("gaussian_naive_bayes".to_owned());
		assert!(matches!(run(&table, &config), Err(Error::EmptyModelSet)));
	}

	#[test]
	fn test_misspelled_exclusion_is_an_error() {
		let table = classification_table(10);
		let mut config = Config::new("class");
		config
			.excluded_models
			.insert("gaussian_bayes".to_owned());
		assert!(matches!(run(&table, &config), Err(Error::UnknownModel(_))));
	}

	#[test]
	fn test_unsupported_problem_type() {
		let table = classification_table(10);
		let mut config = Config::new("class");
		config.problem_type = "ranking".to_owned();
		assert!(matches!(
			run(&table, &config),
			Err(Error::UnsupportedProblemType(_))
		));
	}

	#[test]
	fn test_missing_target_column() {
		let table = classification_table(10);
		let config = Config::new("label");
		assert!(matches!(run(&table, &config), Err(Error::InvalidDataset(_))));
	}

	#[test]
	fn test_runs_are_deterministic() {
		let table = classification_table(30);
		let config = Config::new("class");
		let a = run(&table, &config).unwrap();
		let b = run(&table, &config).unwrap();
		assert_eq!(a.kind, b.kind);
		assert_eq!(a.score, b.score);
		assert_eq!(a.params, b.params);
	}

	#[test]
	fn test_tuning_threshold_gates_the_search() {
		let table = classification_table(30);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("decision_tree_classifier".to_owned());
		config.models = Some(models);
		config.hyperparameter_tuning = true;
		config.hyperparameter_tuning_threshold = 0.0;
		let output = run(&table, &config).unwrap();
		let defaults = registry::default_params(ModelKind::DecisionTreeClassifier);
		assert_eq!(output.params, defaults);
	}

	#[test]
	fn test_tuning_never_lowers_the_winning_score() {
		let table = classification_table(30);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("decision_tree_classifier".to_owned());
		config.models = Some(models.clone());
		let untuned = run(&table, &config).unwrap();
		config.hyperparameter_tuning = true;
		config.hyperparameter_tuning_threshold = 1.1;
		let tuned = run(&table, &config).unwrap();
		assert!(tuned.score >= untuned.score);
	}

	#[test]
	fn test_tuning_a_model_without_a_search_space_aborts_the_run() {
		let table = classification_table(30);
		let mut config = Config::new("class");
		let mut models = BTreeSet::new();
		models.insert("gaussian_naive_bayes".to_owned());
		config.models = Some(models);
		config.hyperparameter_tuning = true;
		config.hyperparameter_tuning_threshold = 1.1;
		assert!(matches!(
			run(&table, &config),
			Err(Error::UnsupportedTuning(_))
		));
	}

	#[test]
	fn test_progress_counter_reaches_the_total() {
		let table = classification_table(20);
		let config = Config::new("class");
		let mut counter = None;
		train(&table, &config, &mut |progress| {
			if let Progress::Evaluating(c) = progress {
				counter = Some(c);
			}
		})
		.unwrap();
		let counter = counter.unwrap();
		assert_eq!(counter.get(), counter.total());
	}

	#[test]
	fn test_invalid_test_fraction() {
		let table = classification_table(10);
		let mut config = Config::new("class");
		config.test_fraction = 1.0;
		assert!(matches!(run(&table, &config), Err(Error::InvalidDataset(_))));
	}

	#[test]
	fn test_choose_best_prefers_the_first_on_ties() {
		let features = arr2(&[[0.0], [1.0]]);
		let target = Target::Classification {
			labels: arr1(&[0, 1]),
			classes: vec!["a".to_owned(), "b".to_owned()],
		};
		let fit = |kind| {
			registry::fit(kind, &registry::default_params(kind), features.view(), &target)
				.unwrap()
		};
		let evaluations = vec![
			Evaluation {
				kind: ModelKind::GaussianNaiveBayes,
				model: fit(ModelKind::GaussianNaiveBayes),
				score: 0.8,
				params: Params::new(),
			},
			Evaluation {
				kind: ModelKind::KNearestNeighborsClassifier,
				model: fit(ModelKind::KNearestNeighborsClassifier),
				score: 0.8,
				params: Params::new(),
			},
		];
		let best = choose_best(evaluations).unwrap();
		assert_eq!(best.kind, ModelKind::GaussianNaiveBayes);
	}
}
