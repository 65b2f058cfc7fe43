use serde::Deserialize;
use std::collections::BTreeSet;

/// Everything that controls a training run.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	/// The name of the column to predict.
	pub target: String,
	/// `"classification"` or `"regression"`.
	#[serde(default = "default_problem_type")]
	pub problem_type: String,
	/// The fraction of rows held out for the final evaluation. Must be
	/// strictly between zero and one.
	#[serde(default = "default_test_fraction")]
	pub test_fraction: f32,
	/// Seeds the shuffle that produces the train/test split.
	#[serde(default = "default_split_seed")]
	pub split_seed: u64,
	/// The models to evaluate, by identifier. `None` evaluates every model
	/// registered for the problem type.
	#[serde(default)]
	pub models: Option<BTreeSet<String>>,
	/// Model identifiers removed from the set after it is resolved.
	#[serde(default)]
	pub excluded_models: BTreeSet<String>,
	/// Whether to grid-search models whose baseline score falls below the
	/// tuning threshold.
	#[serde(default)]
	pub hyperparameter_tuning: bool,
	/// Baseline scores below this trigger tuning.
	#[serde(default = "default_tuning_threshold")]
	pub hyperparameter_tuning_threshold: f32,
	/// The number of cross validation folds used when tuning.
	#[serde(default = "default_n_folds")]
	pub n_folds: usize,
	/// The number of worker threads. `None` uses one per core.
	#[serde(default)]
	pub n_workers: Option<usize>,
}

impl Config {
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			problem_type: default_problem_type(),
			test_fraction: default_test_fraction(),
			split_seed: default_split_seed(),
			models: None,
			excluded_models: BTreeSet::new(),
			hyperparameter_tuning: false,
			hyperparameter_tuning_threshold: default_tuning_threshold(),
			n_folds: default_n_folds(),
			n_workers: None,
		}
	}
}

fn default_problem_type() -> String {
	"classification".to_owned()
}

fn default_test_fraction() -> f32 {
	0.25
}

fn default_split_seed() -> u64 {
	42
}

fn default_tuning_threshold() -> f32 {
	0.5
}

fn default_n_folds() -> usize {
	5
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_new_fills_defaults() {
		let config = Config::new("price");
		assert_eq!(config.target, "price");
		assert_eq!(config.problem_type, "classification");
		assert_eq!(config.test_fraction, 0.25);
		assert_eq!(config.split_seed, 42);
		assert!(config.models.is_none());
		assert!(config.excluded_models.is_empty());
		assert!(!config.hyperparameter_tuning);
		assert_eq!(config.hyperparameter_tuning_threshold, 0.5);
		assert_eq!(config.n_folds, 5);
	}
}
