use super::{ConvergenceMonitor, TrainOptions};
use itertools::izip;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use podium_metrics::{Mean, StreamingMetric};

/// A linear support vector regressor trained on the epsilon-insensitive loss: residuals smaller than `epsilon` contribute no gradient.
#[derive(Clone, Debug)]
pub struct SupportVectorRegressor {
	pub bias: f32,
	pub weights: Array1<f32>,
	/// The mean epsilon-insensitive loss on the training set after each epoch.
	pub losses: Vec<f32>,
}

/// The options passed to `SupportVectorRegressor::train`: the shared SGD options plus the width of the insensitive tube.
#[derive(Clone, Debug)]
pub struct SvrTrainOptions {
	pub epsilon: f32,
	pub train: TrainOptions,
}

impl Default for SvrTrainOptions {
	fn default() -> Self {
		Self {
			epsilon: 0.1,
			train: TrainOptions::default(),
		}
	}
}

impl SupportVectorRegressor {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<f32>,
		options: &SvrTrainOptions,
	) -> Self {
		let n_features = features.ncols();
		let mut model = Self {
			bias: 0.0,
			weights: Array1::zeros(n_features),
			losses: Vec::new(),
		};
		let mut monitor = ConvergenceMonitor::new();
		for _ in 0..options.train.max_epochs {
			let mut epoch_loss = Mean::new();
			for (features, labels) in izip!(
				features.axis_chunks_iter(Axis(0), options.train.n_examples_per_batch),
				labels.axis_chunks_iter(Axis(0), options.train.n_examples_per_batch),
			) {
				let batch_loss = model.train_batch(features, labels, options);
				epoch_loss.update(batch_loss);
			}
			let epoch_loss = epoch_loss.finalize().unwrap_or(f32::NAN);
			model.losses.push(epoch_loss);
			if monitor.update(epoch_loss) {
				break;
			}
		}
		model
	}

	fn train_batch(
		&mut self,
		features: ArrayView2<f32>,
		labels: ArrayView1<f32>,
		options: &SvrTrainOptions,
	) -> f32 {
		let learning_rate = options.train.learning_rate;
		let n_examples = features.nrows().to_f32().unwrap();
		let predictions = features.dot(&self.weights) + self.bias;
		let mut weight_gradients = Array1::<f32>::zeros(self.weights.len());
		let mut bias_gradient = 0.0;
		let mut loss = Mean::new();
		for (features, prediction, label) in izip!(
			features.axis_iter(Axis(0)),
			predictions.iter(),
			labels.iter(),
		) {
			let residual = prediction - label;
			loss.update((residual.abs() - options.epsilon).max(0.0));
			if residual.abs() > options.epsilon {
				let direction = residual.signum();
				for (weight_gradient, feature) in
					izip!(weight_gradients.iter_mut(), features.iter())
				{
					*weight_gradient += direction * feature / n_examples;
				}
				bias_gradient += direction / n_examples;
			}
		}
		for (weight, weight_gradient) in izip!(self.weights.iter_mut(), weight_gradients.iter()) {
			*weight +=
				-learning_rate * (weight_gradient + options.train.l2_regularization * *weight);
		}
		self.bias += -learning_rate * bias_gradient;
		loss.finalize().unwrap_or(0.0)
	}

	/// Return the predicted value for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<f32> {
		let mut predictions = Array1::from_elem(features.nrows(), self.bias);
		ndarray::linalg::general_mat_vec_mul(1.0, &features, &self.weights, 1.0, &mut predictions);
		predictions
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_learns_a_line() {
		let n = 64;
		let xs: Vec<f32> = (0..n).map(|i| i as f32 / n as f32).collect();
		let ys: Vec<f32> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
		let features = Array2::from_shape_vec((n, 1), xs).unwrap();
		let labels = Array1::from(ys);
		let options = SvrTrainOptions {
			epsilon: 0.05,
			train: TrainOptions {
				learning_rate: 0.5,
				max_epochs: 1000,
				..Default::default()
			},
		};
		let model = SupportVectorRegressor::train(features.view(), labels.view(), &options);
		let predictions = model.predict(features.view());
		let max_error = izip!(predictions.iter(), labels.iter())
			.map(|(prediction, label)| (prediction - label).abs())
			.fold(0.0f32, f32::max);
		assert!(max_error < 0.5);
	}
}
