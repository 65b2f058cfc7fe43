use super::{ConvergenceMonitor, TrainOptions};
use itertools::izip;
use ndarray::prelude::*;
use podium_metrics::{Mean, StreamingMetric};
use std::ops::Neg;

/// A logistic regression classifier for two-class targets. Labels are class indexes, `0` or `1`, and `predict` returns the probability of class `1`.
#[derive(Clone, Debug)]
pub struct BinaryClassifier {
	pub bias: f32,
	pub weights: Array1<f32>,
	/// The binary cross entropy on the training set after each epoch.
	pub losses: Vec<f32>,
}

impl BinaryClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
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
		labels: ArrayView1<usize>,
		options: &TrainOptions,
	) -> f32 {
		let learning_rate = options.learning_rate;
		let logits = features.dot(&self.weights) + self.bias;
		let probabilities = logits.mapv(|logit| 1.0 / (logit.neg().exp() + 1.0));
		let mut loss = Mean::new();
		for (probability, label) in izip!(probabilities.iter(), labels.iter()) {
			let probability = probability.clamp(1e-7, 1.0 - 1e-7);
			loss.update(if *label == 1 {
				-probability.ln()
			} else {
				-(1.0 - probability).ln()
			});
		}
		let mut residuals = probabilities;
		for (residual, label) in izip!(residuals.iter_mut(), labels.iter()) {
			*residual -= *label as f32;
		}
		let py = residuals.insert_axis(Axis(1));
		let weight_gradients = (&features * &py).mean_axis(Axis(0)).unwrap();
		let bias_gradient = py.mean_axis(Axis(0)).unwrap()[0];
		for (weight, weight_gradient) in izip!(self.weights.iter_mut(), weight_gradients.iter()) {
			*weight += -learning_rate * (weight_gradient + options.l2_regularization * *weight);
		}
		self.bias += -learning_rate * bias_gradient;
		loss.finalize().unwrap_or(0.0)
	}

	/// Return the probability of class `1` for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<f32> {
		let mut probabilities = Array1::from_elem(features.nrows(), self.bias);
		ndarray::linalg::general_mat_vec_mul(
			1.0,
			&features,
			&self.weights,
			1.0,
			&mut probabilities,
		);
		probabilities.mapv_into(|logit| 1.0 / (logit.neg().exp() + 1.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_separable_classes() {
		// Class 1 iff x > 0.5.
		let n = 64;
		let xs: Vec<f32> = (0..n).map(|i| i as f32 / n as f32).collect();
		let labels: Vec<usize> = xs.iter().map(|x| if *x > 0.5 { 1 } else { 0 }).collect();
		let features = Array2::from_shape_vec((n, 1), xs).unwrap();
		let labels = Array1::from(labels);
		let options = TrainOptions {
			learning_rate: 0.5,
			max_epochs: 500,
			..Default::default()
		};
		let model = BinaryClassifier::train(features.view(), labels.view(), &options);
		let probabilities = model.predict(features.view());
		let n_correct = izip!(probabilities.iter(), labels.iter())
			.filter(|(probability, label)| (**probability > 0.5) == (**label == 1))
			.count();
		assert!(n_correct as f32 / n as f32 > 0.9);
	}
}
