use super::{ConvergenceMonitor, TrainOptions};
use itertools::izip;
use ndarray::prelude::*;
use podium_metrics::{Mean, StreamingMetric};

/// A linear regressor trained with mini-batch SGD on the squared error loss.
#[derive(Clone, Debug)]
pub struct Regressor {
	pub bias: f32,
	pub weights: Array1<f32>,
	/// The mean squared error on the training set after each epoch.
	pub losses: Vec<f32>,
}

impl Regressor {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<f32>,
		options: &TrainOptions,
	) -> Self {
		let n_features = features.ncols();
		let mut model = Self {
			bias: 0.0,
			weights: Array1::zeros(n_features),
			losses: Vec::new(),
		};
		let mut monitor = ConvergenceMonitor::new();
		for _ in 0..options.max_epochs {
			let mut epoch_loss = Mean::new();
			for (features, labels) in izip!(
				features.axis_chunks_iter(Axis(0), options.n_examples_per_batch),
				labels.axis_chunks_iter(Axis(0), options.n_examples_per_batch),
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
		options: &TrainOptions,
	) -> f32 {
		let learning_rate = options.learning_rate;
		let predictions = features.dot(&self.weights) + self.bias;
		let residuals = &predictions - &labels;
		let loss = residuals.mapv(|residual| residual * residual).mean().unwrap_or(0.0);
		let py = residuals.insert_axis(Axis(1));
		let weight_gradients = (&features * &py).mean_axis(Axis(0)).unwrap();
		let bias_gradient = py.mean_axis(Axis(0)).unwrap()[0];
		for (weight, weight_gradient) in izip!(self.weights.iter_mut(), weight_gradients.iter()) {
			*weight += -learning_rate * (weight_gradient + options.l2_regularization * *weight);
		}
		self.bias += -learning_rate * bias_gradient;
		loss
	}

	/// Return the predicted value for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<f32> {
		let mut predictions = Array1::from_elem(features.nrows(), self.bias);
		ndarray::linalg::general_mat_vec_mul(1.0, &features, &self.weights, 1.0, &mut predictions);
		predictions
	}
}
