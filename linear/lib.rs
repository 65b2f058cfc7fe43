/*!
This crate implements linear models trained with mini-batch stochastic gradient descent. There are five model types: [`Regressor`](struct.Regressor.html) (least squares), [`BinaryClassifier`](struct.BinaryClassifier.html) (sigmoid), [`MulticlassClassifier`](struct.MulticlassClassifier.html) (softmax), [`SupportVectorClassifier`](struct.SupportVectorClassifier.html) (hinge loss), and [`SupportVectorRegressor`](struct.SupportVectorRegressor.html) (epsilon-insensitive loss).

Each model records its loss on the training set after every epoch and stops early once the loss plateaus.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod binary_classifier;
mod multiclass_classifier;
mod regressor;
mod support_vector_classifier;
mod support_vector_regressor;

pub use self::binary_classifier::BinaryClassifier;
pub use self::multiclass_classifier::MulticlassClassifier;
pub use self::regressor::Regressor;
pub use self::support_vector_classifier::SupportVectorClassifier;
pub use self::support_vector_regressor::{SupportVectorRegressor, SvrTrainOptions};

/// These are the options passed to the `train` function of each model type.
#[derive(Clone, Debug)]
pub struct TrainOptions {
	/// The L2 regularization applied when updating the model parameters.
	pub l2_regularization: f32,
	/// The learning rate applied when updating the model parameters.
	pub learning_rate: f32,
	/// The maximum number of epochs to train.
	pub max_epochs: usize,
	/// The number of examples in each training batch.
	pub n_examples_per_batch: usize,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			l2_regularization: 0.0,
			learning_rate: 0.1,
			max_epochs: 100,
			n_examples_per_batch: 32,
		}
	}
}

const TOLERANCE: f32 = 1e-4;
const N_EPOCHS_NO_IMPROVE: usize = 5;

/// The `ConvergenceMonitor` keeps track of the training loss after each epoch, and once enough epochs have passed without a significant decrease, `update()` returns `true` to indicate that training should stop.
#[derive(Clone, Debug, Default)]
pub struct ConvergenceMonitor {
	previous_loss: Option<f32>,
	n_epochs_no_improve: usize,
}

impl ConvergenceMonitor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Update with the loss from the epoch that just finished. Returns true if training should stop.
	pub fn update(&mut self, loss: f32) -> bool {
		let result = if let Some(previous_loss) = self.previous_loss {
			if loss > previous_loss || f32::abs(loss - previous_loss) < TOLERANCE {
				self.n_epochs_no_improve += 1;
				self.n_epochs_no_improve >= N_EPOCHS_NO_IMPROVE
			} else {
				self.n_epochs_no_improve = 0;
				false
			}
		} else {
			false
		};
		self.previous_loss = Some(loss);
		result
	}
}
