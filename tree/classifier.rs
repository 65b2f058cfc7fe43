use crate::TreeTrainOptions;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// A CART decision tree classifier. Splits minimize the weighted gini impurity of the children. Labels are class indexes in `0..n_classes`.
#[derive(Clone, Debug)]
pub struct TreeClassifier {
	pub nodes: Vec<Node>,
	pub n_classes: usize,
}

#[derive(Clone, Debug)]
pub enum Node {
	Branch(BranchNode),
	Leaf(LeafNode),
}

#[derive(Clone, Debug)]
pub struct BranchNode {
	pub feature_index: usize,
	pub split_value: f32,
	pub left_child_index: usize,
	pub right_child_index: usize,
}

#[derive(Clone, Debug)]
pub struct LeafNode {
	pub class_index: usize,
}

impl TreeClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
		n_classes: usize,
		options: &TreeTrainOptions,
	) -> Self {
		let mut nodes = Vec::new();
		let indices: Vec<usize> = (0..features.nrows()).collect();
		let mut rng = Xoshiro256Plus::seed_from_u64(options.seed);
		grow(
			&mut nodes, features, labels, n_classes, indices, 0, options, &mut rng,
		);
		Self { nodes, n_classes }
	}

	/// Return the predicted class index for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<usize> {
		features
			.axis_iter(Axis(0))
			.map(|row| {
				let mut node_index = 0;
				loop {
					match &self.nodes[node_index] {
						Node::Leaf(leaf) => break leaf.class_index,
						Node::Branch(branch) => {
							node_index = if row[branch.feature_index] <= branch.split_value {
								branch.left_child_index
							} else {
								branch.right_child_index
							};
						}
					}
				}
			})
			.collect()
	}
}

#[allow(clippy::too_many_arguments)]
fn grow(
	nodes: &mut Vec<Node>,
	features: ArrayView2<f32>,
	labels: ArrayView1<usize>,
	n_classes: usize,
	indices: Vec<usize>,
	depth: usize,
	options: &TreeTrainOptions,
	rng: &mut Xoshiro256Plus,
) -> usize {
	let class_counts = count_classes(labels, &indices, n_classes);
	let majority_class = class_counts
		.iter()
		.enumerate()
		.max_by_key(|(_, count)| **count)
		.map(|(class_index, _)| class_index)
		.unwrap_or(0);
	let is_pure = class_counts.iter().filter(|count| **count > 0).count() <= 1;
	let depth_exhausted = options
		.max_depth
		.map(|max_depth| depth >= max_depth)
		.unwrap_or(false);
	if is_pure || depth_exhausted || indices.len() < options.min_examples_to_split {
		nodes.push(Node::Leaf(LeafNode {
			class_index: majority_class,
		}));
		return nodes.len() - 1;
	}
	let candidate_features = crate::forest::sample_features(features.ncols(), options, rng);
	let best_split = candidate_features
		.iter()
		.filter_map(|feature_index| {
			best_split_for_feature(
				features,
				labels,
				n_classes,
				&indices,
				*feature_index,
				options.min_examples_per_leaf,
			)
		})
		.fold(None, |best: Option<Split>, split| match best {
			Some(best) if best.gain >= split.gain => Some(best),
			_ => Some(split),
		});
	let split = match best_split {
		Some(split) if split.gain > 0.0 => split,
		_ => {
			nodes.push(Node::Leaf(LeafNode {
				class_index: majority_class,
			}));
			return nodes.len() - 1;
		}
	};
	let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
		.into_iter()
		.partition(|index| features[(*index, split.feature_index)] <= split.split_value);
	// Reserve this node's slot, then grow the children below it.
	let node_index = nodes.len();
	nodes.push(Node::Leaf(LeafNode {
		class_index: majority_class,
	}));
	let left_child_index = grow(
		nodes,
		features,
		labels,
		n_classes,
		left_indices,
		depth + 1,
		options,
		rng,
	);
	let right_child_index = grow(
		nodes,
		features,
		labels,
		n_classes,
		right_indices,
		depth + 1,
		options,
		rng,
	);
	nodes[node_index] = Node::Branch(BranchNode {
		feature_index: split.feature_index,
		split_value: split.split_value,
		left_child_index,
		right_child_index,
	});
	node_index
}

struct Split {
	feature_index: usize,
	split_value: f32,
	gain: f32,
}

fn count_classes(labels: ArrayView1<usize>, indices: &[usize], n_classes: usize) -> Vec<usize> {
	let mut counts = vec![0; n_classes];
	for index in indices {
		counts[labels[*index]] += 1;
	}
	counts
}

fn gini(counts: &[usize], total: f32) -> f32 {
	if total == 0.0 {
		return 0.0;
	}
	1.0 - counts
		.iter()
		.map(|count| {
			let p = count.to_f32().unwrap() / total;
			p * p
		})
		.sum::<f32>()
}

fn best_split_for_feature(
	features: ArrayView2<f32>,
	labels: ArrayView1<usize>,
	n_classes: usize,
	indices: &[usize],
	feature_index: usize,
	min_examples_per_leaf: usize,
) -> Option<Split> {
	let mut examples: Vec<(f32, usize)> = indices
		.iter()
		.map(|index| (features[(*index, feature_index)], labels[*index]))
		.collect();
	examples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
	let n = examples.len();
	let total = n.to_f32().unwrap();
	let total_counts = {
		let mut counts = vec![0; n_classes];
		for (_, label) in examples.iter() {
			counts[*label] += 1;
		}
		counts
	};
	let parent_impurity = gini(&total_counts, total);
	let mut left_counts = vec![0usize; n_classes];
	let mut best: Option<Split> = None;
	for i in 0..n - 1 {
		left_counts[examples[i].1] += 1;
		if examples[i].0 == examples[i + 1].0 {
			continue;
		}
		let n_left = i + 1;
		let n_right = n - n_left;
		if n_left < min_examples_per_leaf || n_right < min_examples_per_leaf {
			continue;
		}
		let right_counts: Vec<usize> = total_counts
			.iter()
			.zip(left_counts.iter())
			.map(|(total, left)| total - left)
			.collect();
		let weighted_impurity = (n_left.to_f32().unwrap() * gini(&left_counts, n_left.to_f32().unwrap())
			+ n_right.to_f32().unwrap() * gini(&right_counts, n_right.to_f32().unwrap()))
			/ total;
		let gain = parent_impurity - weighted_impurity;
		let split_value = (examples[i].0 + examples[i + 1].0) / 2.0;
		match &best {
			Some(best_so_far) if best_so_far.gain >= gain => {}
			_ => {
				best = Some(Split {
					feature_index,
					split_value,
					gain,
				});
			}
		}
	}
	best
}
