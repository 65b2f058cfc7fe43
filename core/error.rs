use thiserror::Error;

/// An error encountered while training.
#[derive(Debug, Error)]
pub enum Error {
	#[error("\"{0}\" is not a supported problem type, expected \"classification\" or \"regression\"")]
	UnsupportedProblemType(String),
	#[error("\"{0}\" does not name a registered model for this problem type")]
	UnknownModel(String),
	#[error("the set of models to evaluate is empty")]
	EmptyModelSet,
	#[error("model \"{0}\" does not have a hyperparameter search space")]
	UnsupportedTuning(&'static str),
	#[error("no evaluation produced a result")]
	NoResults,
	#[error("invalid dataset: {0}")]
	InvalidDataset(String),
	#[error("failed to fit model \"{model}\": {message}")]
	FitFailed {
		model: &'static str,
		message: String,
	},
	#[error("failed to build the thread pool")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
