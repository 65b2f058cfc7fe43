use crate::{TreeClassifier, TreeRegressor, TreeTrainOptions};
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;

/// These are the options passed to `ForestClassifier::train` and `ForestRegressor::train`.
#[derive(Clone, Debug)]
pub struct ForestTrainOptions {
	/// The number of trees in the forest.
	pub n_trees: usize,
	/// The maximum depth of each tree.
	pub max_depth: Option<usize>,
	/// Each leaf must contain at least this many training examples.
	pub min_examples_per_leaf: usize,
	/// The number of features considered at each split. `None` uses sqrt(n_features) for classification and n_features / 3 for regression.
	pub max_features: Option<usize>,
	/// Seeds the bootstrap sampling and per-tree feature subsampling.
	pub seed: u64,
}

impl Default for ForestTrainOptions {
	fn default() -> Self {
		Self {
			n_trees: 100,
			max_depth: None,
			min_examples_per_leaf: 1,
			max_features: None,
			seed: 42,
		}
	}
}

/// A random forest classifier: bootstrap-aggregated [`TreeClassifier`](struct.TreeClassifier.html)s voting by majority.
#[derive(Clone, Debug)]
pub struct ForestClassifier {
	pub trees: Vec<TreeClassifier>,
	pub n_classes: usize,
}

impl ForestClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
		n_classes: usize,
		options: &ForestTrainOptions,
	) -> Self {
		let max_features = options
			.max_features
			.unwrap_or_else(|| sqrt_features(features.ncols()));
		let trees = (0..options.n_trees)
			.into_par_iter()
			.map(|tree_index| {
				let mut rng =
					Xoshiro256Plus::seed_from_u64(options.seed.wrapping_add(tree_index as u64));
				let bootstrap = bootstrap_indices(features.nrows(), &mut rng);
				let tree_features = features.select(Axis(0), &bootstrap);
				let tree_labels = labels.select(Axis(0), &bootstrap);
				let tree_options = TreeTrainOptions {
					max_depth: options.max_depth,
					min_examples_per_leaf: options.min_examples_per_leaf,
					min_examples_to_split: options.min_examples_per_leaf.max(1) * 2,
					max_features: Some(max_features),
					seed: rng.gen(),
				};
				TreeClassifier::train(
					tree_features.view(),
					tree_labels.view(),
					n_classes,
					&tree_options,
				)
			})
			.collect();
		Self { trees, n_classes }
	}

	/// Return the majority-vote class index for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<usize> {
		let tree_predictions: Vec<Array1<usize>> = self
			.trees
			.iter()
			.map(|tree| tree.predict(features))
			.collect();
		(0..features.nrows())
			.map(|row_index| {
				let mut votes = vec![0usize; self.n_classes];
				for tree_prediction in tree_predictions.iter() {
					votes[tree_prediction[row_index]] += 1;
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

/// A random forest regressor: bootstrap-aggregated [`TreeRegressor`](struct.TreeRegressor.html)s averaging their predictions.
#[derive(Clone, Debug)]
pub struct ForestRegressor {
	pub trees: Vec<TreeRegressor>,
}

impl ForestRegressor {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<f32>,
		options: &ForestTrainOptions,
	) -> Self {
		let max_features = options
			.max_features
			.unwrap_or_else(|| (features.ncols() / 3).max(1));
		let trees = (0..options.n_trees)
			.into_par_iter()
			.map(|tree_index| {
				let mut rng =
					Xoshiro256Plus::seed_from_u64(options.seed.wrapping_add(tree_index as u64));
				let bootstrap = bootstrap_indices(features.nrows(), &mut rng);
				let tree_features = features.select(Axis(0), &bootstrap);
				let tree_labels = labels.select(Axis(0), &bootstrap);
				let tree_options = TreeTrainOptions {
					max_depth: options.max_depth,
					min_examples_per_leaf: options.min_examples_per_leaf,
					min_examples_to_split: options.min_examples_per_leaf.max(1) * 2,
					max_features: Some(max_features),
					seed: rng.gen(),
				};
				TreeRegressor::train(tree_features.view(), tree_labels.view(), &tree_options)
			})
			.collect();
		Self { trees }
	}

	/// Return the mean prediction of the trees for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<f32> {
		let mut predictions = Array1::<f32>::zeros(features.nrows());
		for tree in self.trees.iter() {
			predictions += &tree.predict(features);
		}
		predictions / self.trees.len().to_f32().unwrap()
	}
}

fn bootstrap_indices(n_rows: usize, rng: &mut Xoshiro256Plus) -> Vec<usize> {
	(0..n_rows).map(|_| rng.gen_range(0, n_rows)).collect()
}

/// The feature subset considered at each split of each tree in `options`, or every feature when subsampling is off.
pub(crate) fn sample_features(
	n_features: usize,
	options: &TreeTrainOptions,
	rng: &mut Xoshiro256Plus,
) -> Vec<usize> {
	match options.max_features {
		Some(max_features) if max_features < n_features => {
			rand::seq::index::sample(rng, n_features, max_features).into_vec()
		}
		_ => (0..n_features).collect(),
	}
}

fn sqrt_features(n_features: usize) -> usize {
	(n_features.to_f32().unwrap().sqrt().round() as usize).max(1)
}
