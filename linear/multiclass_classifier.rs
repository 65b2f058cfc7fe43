use super::{ConvergenceMonitor, TrainOptions};
use itertools::izip;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use podium_metrics::{Mean, StreamingMetric};

/// A softmax classifier for targets with more than two classes. It trains `n_classes` linear models whose outputs are combined with the softmax function. Labels are class indexes in `0..n_classes`.
#[derive(Clone, Debug)]
pub struct MulticlassClassifier {
	/// Shape `(n_features, n_classes)`.
	pub weights: Array2<f32>,
	pub biases: Array1<f32>,
	/// The cross entropy on the training set after each epoch.
	pub losses: Vec<f32>,
}

impl MulticlassClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
		n_classes: usize,
		options: &TrainOptions,
	) -> Self {
		let n_features = features.ncols();
		let mut model = Self {
			weights: Array2::zeros((n_features, n_classes)),
			biases: Array1::zeros(n_classes),
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
		let mut probabilities = features.dot(&self.weights) + &self.biases;
		softmax_rows(probabilities.view_mut());
		let mut loss = Mean::new();
		for (mut row, label) in izip!(probabilities.axis_iter_mut(Axis(0)), labels.iter()) {
			loss.update(-row[*label].max(1e-7).ln());
			row[*label] -= 1.0;
		}
		let weight_gradients = features.t().dot(&probabilities) / n_examples;
		let bias_gradients = probabilities.mean_axis(Axis(0)).unwrap();
		for (weight, weight_gradient) in izip!(self.weights.iter_mut(), weight_gradients.iter()) {
			*weight += -learning_rate * (weight_gradient + options.l2_regularization * *weight);
		}
		for (bias, bias_gradient) in izip!(self.biases.iter_mut(), bias_gradients.iter()) {
			*bias += -learning_rate * bias_gradient;
		}
		loss.finalize().unwrap_or(0.0)
	}

	/// Return the class probabilities for each row of `features`, shape `(n_rows, n_classes)`.
	pub fn predict_probabilities(&self, features: ArrayView2<f32>) -> Array2<f32> {
		let mut probabilities = features.dot(&self.weights) + &self.biases;
		softmax_rows(probabilities.view_mut());
		probabilities
	}

	/// Return the predicted class index for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<usize> {
		let probabilities = self.predict_probabilities(features);
		probabilities
			.axis_iter(Axis(0))
			.map(|row| {
				row.iter()
					.enumerate()
					.fold((0, f32::NEG_INFINITY), |best, (index, probability)| {
						if *probability > best.1 {
							(index, *probability)
						} else {
							best
						}
					})
					.0
			})
			.collect()
	}
}

fn softmax_rows(mut logits: ArrayViewMut2<f32>) {
	for mut row in logits.axis_iter_mut(Axis(0)) {
		let max = row.iter().fold(f32::NEG_INFINITY, |max, logit| max.max(*logit));
		row.mapv_inplace(|logit| (logit - max).exp());
		let sum = row.sum();
		row.mapv_inplace(|value| value / sum);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_three_separable_classes() {
		// Class is the third of [0, 1) that x falls in.
		let n = 90;
		let xs: Vec<f32> = (0..n).map(|i| i as f32 / n as f32).collect();
		let labels: Vec<usize> = xs.iter().map(|x| (x * 3.0) as usize).collect();
		let features = Array2::from_shape_vec((n, 1), xs).unwrap();
		let labels = Array1::from(labels);
		let options = TrainOptions {
			learning_rate: 0.5,
			max_epochs: 1000,
			..Default::default()
		};
		let model = MulticlassClassifier::train(features.view(), labels.view(), 3, &options);
		let predictions = model.predict(features.view());
		let n_correct = izip!(predictions.iter(), labels.iter())
			.filter(|(prediction, label)| prediction == label)
			.count();
		assert!(n_correct as f32 / n as f32 > 0.8);
	}

	#[test]
	fn test_probabilities_sum_to_one() {
		let features = Array2::from_shape_vec((2, 2), vec![0.0, 1.0, 1.0, 0.0]).unwrap();
		let labels = Array1::from(vec![0, 1]);
		let model =
			MulticlassClassifier::train(features.view(), labels.view(), 3, &TrainOptions::default());
		let probabilities = model.predict_probabilities(features.view());
		for row in probabilities.axis_iter(Axis(0)) {
			assert!((row.sum() - 1.0).abs() < 1e-5);
		}
	}
}
