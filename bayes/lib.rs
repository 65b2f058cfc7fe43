/*!
This crate implements a Gaussian naive Bayes classifier. Training computes the mean and variance of each feature within each class along with the class priors; prediction picks the class with the greatest log posterior under the per-feature Gaussian likelihoods.
*/

#![allow(clippy::tabs_in_doc_comments)]

use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// These are the options passed to `GaussianNaiveBayes::train`.
#[derive(Clone, Debug)]
pub struct BayesTrainOptions {
	/// Added to every feature variance to keep the likelihoods finite when a feature is constant within a class.
	pub variance_smoothing: f32,
}

impl Default for BayesTrainOptions {
	fn default() -> Self {
		Self {
			variance_smoothing: 1e-9,
		}
	}
}

#[derive(Clone, Debug)]
pub struct GaussianNaiveBayes {
	/// Shape `(n_classes, n_features)`.
	pub means: Array2<f32>,
	/// Shape `(n_classes, n_features)`.
	pub variances: Array2<f32>,
	pub log_priors: Array1<f32>,
}

impl GaussianNaiveBayes {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
		n_classes: usize,
		options: &BayesTrainOptions,
	) -> Self {
		let n_features = features.ncols();
		let n_examples = features.nrows();
		let mut counts = vec![0usize; n_classes];
		let mut means = Array2::<f32>::zeros((n_classes, n_features));
		for (row, label) in features.axis_iter(Axis(0)).zip(labels.iter()) {
			counts[*label] += 1;
			let mut class_means = means.row_mut(*label);
			class_means += &row;
		}
		for (class_index, count) in counts.iter().enumerate() {
			if *count > 0 {
				let mut class_means = means.row_mut(class_index);
				class_means /= count.to_f32().unwrap();
			}
		}
		// The largest feature variance in the dataset scales the smoothing, so it stays meaningful for features of any magnitude.
		let max_variance = column_variances(features)
			.iter()
			.fold(0.0f32, |max, variance| max.max(*variance));
		let smoothing = options.variance_smoothing * max_variance.max(1.0);
		let mut variances = Array2::<f32>::from_elem((n_classes, n_features), smoothing);
		for (row, label) in features.axis_iter(Axis(0)).zip(labels.iter()) {
			let class_means = means.row(*label);
			let mut class_variances = variances.row_mut(*label);
			for ((variance, mean), value) in class_variances
				.iter_mut()
				.zip(class_means.iter())
				.zip(row.iter())
			{
				*variance += (value - mean) * (value - mean);
			}
		}
		for (class_index, count) in counts.iter().enumerate() {
			if *count > 0 {
				let mut class_variances = variances.row_mut(class_index);
				class_variances /= count.to_f32().unwrap();
			}
		}
		let log_priors = counts
			.iter()
			.map(|count| {
				if *count == 0 {
					f32::NEG_INFINITY
				} else {
					(count.to_f32().unwrap() / n_examples.to_f32().unwrap()).ln()
				}
			})
			.collect();
		Self {
			means,
			variances,
			log_priors,
		}
	}

	/// Return the class with the greatest log posterior for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<usize> {
		features
			.axis_iter(Axis(0))
			.map(|row| {
				let mut best = (0, f32::NEG_INFINITY);
				for class_index in 0..self.log_priors.len() {
					let mut log_posterior = self.log_priors[class_index];
					if log_posterior == f32::NEG_INFINITY {
						continue;
					}
					for (feature_index, value) in row.iter().enumerate() {
						let mean = self.means[(class_index, feature_index)];
						let variance = self.variances[(class_index, feature_index)];
						log_posterior += -0.5 * (2.0 * std::f32::consts::PI * variance).ln()
							- (value - mean) * (value - mean) / (2.0 * variance);
					}
					if log_posterior > best.1 {
						best = (class_index, log_posterior);
					}
				}
				best.0
			})
			.collect()
	}
}

fn column_variances(features: ArrayView2<f32>) -> Vec<f32> {
	features
		.axis_iter(Axis(1))
		.map(|column| {
			let mean = column.mean().unwrap_or(0.0);
			column
				.iter()
				.map(|value| (value - mean) * (value - mean))
				.sum::<f32>() / column.len().to_f32().unwrap().max(1.0)
		})
		.collect()
}
