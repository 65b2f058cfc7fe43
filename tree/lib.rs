/*!
This crate implements CART decision trees for classification and regression, and random forests built by bootstrap aggregation over them. Trees are stored as flat node arrays and grown by exhaustive threshold search, using gini impurity for classification and variance reduction for regression.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod classifier;
mod forest;
mod regressor;

pub use self::classifier::TreeClassifier;
pub use self::forest::{ForestClassifier, ForestRegressor, ForestTrainOptions};
pub use self::regressor::TreeRegressor;

/// These are the options passed to `TreeClassifier::train` and `TreeRegressor::train`.
#[derive(Clone, Debug)]
pub struct TreeTrainOptions {
	/// The maximum depth of the tree. `None` grows until the other limits stop the recursion.
	pub max_depth: Option<usize>,
	/// Each leaf must contain at least this many training examples.
	pub min_examples_per_leaf: usize,
	/// A node with fewer examples than this becomes a leaf without searching for a split.
	pub min_examples_to_split: usize,
	/// The number of features to consider at each split. `None` considers all of them. Forests set this to a random subset size.
	pub max_features: Option<usize>,
	/// Seeds the feature subsampling. Unused when `max_features` is `None`.
	pub seed: u64,
}

impl Default for TreeTrainOptions {
	fn default() -> Self {
		Self {
			max_depth: None,
			min_examples_per_leaf: 1,
			min_examples_to_split: 2,
			max_features: None,
			seed: 0,
		}
	}
}
