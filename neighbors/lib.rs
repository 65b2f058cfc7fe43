/*!
This crate implements brute-force k-nearest-neighbors models. Training stores the dataset; prediction finds the `n_neighbors` training rows closest in Euclidean distance and takes the majority class ([`KNeighborsClassifier`](struct.KNeighborsClassifier.html)) or the mean label ([`KNeighborsRegressor`](struct.KNeighborsRegressor.html)).
*/

#![allow(clippy::tabs_in_doc_comments)]

use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// These are the options passed to `KNeighborsClassifier::train` and `KNeighborsRegressor::train`.
#[derive(Clone, Debug)]
pub struct NeighborsTrainOptions {
	pub n_neighbors: usize,
}

impl Default for NeighborsTrainOptions {
	fn default() -> Self {
		Self { n_neighbors: 5 }
	}
}

#[derive(Clone, Debug)]
pub struct KNeighborsClassifier {
	features: Array2<f32>,
	labels: Array1<usize>,
	n_classes: usize,
	n_neighbors: usize,
}

impl KNeighborsClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
		n_classes: usize,
		options: &NeighborsTrainOptions,
	) -> Self {
		Self {
			features: features.to_owned(),
			labels: labels.to_owned(),
			n_classes,
			n_neighbors: options.n_neighbors.max(1),
		}
	}

	/// Return the majority class among the nearest neighbors of each row of `features`. Distance ties are resolved in favor of earlier training rows.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<usize> {
		features
			.axis_iter(Axis(0))
			.map(|row| {
				let neighbors = nearest(self.features.view(), row, self.n_neighbors);
				let mut votes = vec![0usize; self.n_classes];
				for neighbor in neighbors {
					votes[self.labels[neighbor]] += 1;
				}
				votes
					.iter()
					.enumerate()
					.max_by_key(|(_, count)| **count)
					.map(|(class_index, _)| class_index)
					.unwrap_or(0)
			})
			.collect()
	}
}

#[derive(Clone, Debug)]
pub struct KNeighborsRegressor {
	features: Array2<f32>,
	labels: Array1<f32>,
	n_neighbors: usize,
}

impl KNeighborsRegressor {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<f32>,
		options: &NeighborsTrainOptions,
	) -> Self {
		Self {
			features: features.to_owned(),
			labels: labels.to_owned(),
			n_neighbors: options.n_neighbors.max(1),
		}
	}

	/// Return the mean label of the nearest neighbors of each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<f32> {
		features
			.axis_iter(Axis(0))
			.map(|row| {
				let neighbors = nearest(self.features.view(), row, self.n_neighbors);
				let sum: f32 = neighbors
					.iter()
					.map(|neighbor| self.labels[*neighbor])
					.sum();
				sum / neighbors.len().to_f32().unwrap()
			})
			.collect()
	}
}

/// The indexes of the `k` training rows closest to `row`, nearest first.
fn nearest(features: ArrayView2<f32>, row: ArrayView1<f32>, k: usize) -> Vec<usize> {
	let mut distances: Vec<(f32, usize)> = features
		.axis_iter(Axis(0))
		.enumerate()
		.map(|(index, train_row)| {
			let distance = train_row
				.iter()
				.zip(row.iter())
				.map(|(a, b)| (a - b) * (a - b))
				.sum::<f32>();
			(distance, index)
		})
		.collect();
	distances.sort_by(|a, b| {
		a.0.partial_cmp(&b.0)
			.unwrap_or(std::cmp::Ordering::Equal)
			.then(a.1.cmp(&b.1))
	});
	distances
		.into_iter()
		.take(k.min(features.nrows()))
		.map(|(_, index)| index)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classifier_votes() {
		let features =
			Array2::from_shape_vec((6, 1), vec![0.0, 0.1, 0.2, 10.0, 10.1, 10.2]).unwrap();
		let labels = Array1::from(vec![0, 0, 0, 1, 1, 1]);
		let model = KNeighborsClassifier::train(
			features.view(),
			labels.view(),
			2,
			&NeighborsTrainOptions { n_neighbors: 3 },
		);
		let queries = Array2::from_shape_vec((2, 1), vec![0.05, 9.9]).unwrap();
		let predictions = model.predict(queries.view());
		assert_eq!(predictions, Array1::from(vec![0, 1]));
	}

	#[test]
	fn test_regressor_means() {
		let features = Array2::from_shape_vec((4, 1), vec![0.0, 1.0, 10.0, 11.0]).unwrap();
		let labels = Array1::from(vec![2.0, 4.0, 20.0, 40.0]);
		let model = KNeighborsRegressor::train(
			features.view(),
			labels.view(),
			&NeighborsTrainOptions { n_neighbors: 2 },
		);
		let queries = Array2::from_shape_vec((1, 1), vec![0.5]).unwrap();
		let predictions = model.predict(queries.view());
		assert!((predictions[0] - 3.0).abs() < 1e-6);
	}

	#[test]
	fn test_k_larger_than_dataset() {
		let features = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
		let labels = Array1::from(vec![1.0, 3.0]);
		let model = KNeighborsRegressor::train(
			features.view(),
			labels.view(),
			&NeighborsTrainOptions { n_neighbors: 10 },
		);
		let queries = Array2::from_shape_vec((1, 1), vec![0.0]).unwrap();
		assert!((model.predict(queries.view())[0] - 2.0).abs() < 1e-6);
	}
}
