use super::{ConvergenceMonitor, TrainOptions};
use itertools::izip;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use podium_metrics::{Mean, StreamingMetric};

/// A linear support vector classifier trained on the hinge loss. Labels are class indexes, `0` or `1`, mapped internally to `-1`/`+1`. `predict_decision` returns the signed distance from the separating hyperplane.
#[derive(Clone, Debug)]
pub struct SupportVectorClassifier {
	pub bias: f32,
	pub weights: Array1<f32>,
	/// The mean hinge loss on the training set after each epoch.
	pub losses: Vec<f32>,
}

impl SupportVectorClassifier {
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
		let n_examples = features.nrows().to_f32().unwrap();
		let decisions = features.dot(&self.weights) + self.bias;
		let mut weight_gradients = Array1::<f32>::zeros(self.weights.len());
		let mut bias_gradient = 0.0;
		let mut loss = Mean::new();
		for (features, decision, label) in izip!(
			features.axis_iter(Axis(0)),
			decisions.iter(),
			labels.iter(),
		) {
			let y = if *label == 1 { 1.0f32 } else { -1.0 };
			let margin = y * decision;
			loss.update((1.0 - margin).max(0.0));
			if margin < 1.0 {
				for (weight_gradient, feature) in
					izip!(weight_gradients.iter_mut(), features.iter())
				{
					*weight_gradient += -y * feature / n_examples;
				}
				bias_gradient += -y / n_examples;
			}
		}
		for (weight, weight_gradient) in izip!(self.weights.iter_mut(), weight_gradients.iter()) {
			*weight += -learning_rate * (weight_gradient + options.l2_regularization * *weight);
		}
		self.bias += -learning_rate * bias_gradient;
		loss.finalize().unwrap_or(0.0)
	}

	/// Return the signed distance from the separating hyperplane for each row of `features`. Non-negative values predict class `1`.
	pub fn predict_decision(&self, features: ArrayView2<f32>) -> Array1<f32> {
		let mut decisions = Array1::from_elem(features.nrows(), self.bias);
		ndarray::linalg::general_mat_vec_mul(1.0, &features, &self.weights, 1.0, &mut decisions);
		decisions
	}
}
