use crate::TreeTrainOptions;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// A CART decision tree regressor. Splits maximize the reduction in the sum of squared errors and each leaf predicts the mean label of its training examples.
#[derive(Clone, Debug)]
pub struct TreeRegressor {
	pub nodes: Vec<Node>,
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
	pub value: f32,
}

impl TreeRegressor {
	pub fn train(
		features: ArrayView2<f32>,
		labels: ArrayView1<f32>,
		options: &TreeTrainOptions,
	) -> Self {
		let mut nodes = Vec::new();
		let indices: Vec<usize> = (0..features.nrows()).collect();
		let mut rng = Xoshiro256Plus::seed_from_u64(options.seed);
		grow(&mut nodes, features, labels, indices, 0, options, &mut rng);
		Self { nodes }
	}

	/// Return the predicted value for each row of `features`.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array1<f32> {
		features
			.axis_iter(Axis(0))
			.map(|row| {
				let mut node_index = 0;
				loop {
					match &self.nodes[node_index] {
						Node::Leaf(leaf) => break leaf.value,
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

fn grow(
	nodes: &mut Vec<Node>,
	features: ArrayView2<f32>,
	labels: ArrayView1<f32>,
	indices: Vec<usize>,
	depth: usize,
	options: &TreeTrainOptions,
	rng: &mut Xoshiro256Plus,
) -> usize {
	let mean = if indices.is_empty() {
		0.0
	} else {
		indices.iter().map(|index| labels[*index]).sum::<f32>() / indices.len().to_f32().unwrap()
	};
	let depth_exhausted = options
		.max_depth
		.map(|max_depth| depth >= max_depth)
		.unwrap_or(false);
	if depth_exhausted || indices.len() < options.min_examples_to_split {
		nodes.push(Node::Leaf(LeafNode { value: mean }));
		return nodes.len() - 1;
	}
	let candidate_features = crate::forest::sample_features(features.ncols(), options, rng);
	let best_split = candidate_features
		.iter()
		.filter_map(|feature_index| {
			best_split_for_feature(
				features,
				labels,
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
		Some(split) if split.gain > 1e-8 => split,
		_ => {
			nodes.push(Node::Leaf(LeafNode { value: mean }));
			return nodes.len() - 1;
		}
	};
	let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
		.into_iter()
		.partition(|index| features[(*index, split.feature_index)] <= split.split_value);
	let node_index = nodes.len();
	nodes.push(Node::Leaf(LeafNode { value: mean }));
	let left_child_index = grow(
		nodes,
		features,
		labels,
		left_indices,
		depth + 1,
		options,
		rng,
	);
	let right_child_index = grow(
		nodes,
		features,
		labels,
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

fn best_split_for_feature(
	features: ArrayView2<f32>,
	labels: ArrayView1<f32>,
	indices: &[usize],
	feature_index: usize,
	min_examples_per_leaf: usize,
) -> Option<Split> {
	let mut examples: Vec<(f32, f32)> = indices
		.iter()
		.map(|index| (features[(*index, feature_index)], labels[*index]))
		.collect();
	examples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
	let n = examples.len();
	let total_sum: f64 = examples.iter().map(|(_, label)| *label as f64).sum();
	let total_sum_squares: f64 = examples
		.iter()
		.map(|(_, label)| (*label as f64) * (*label as f64))
		.sum();
	let parent_sse = sse(total_sum, total_sum_squares, n);
	let mut left_sum = 0.0f64;
	let mut left_sum_squares = 0.0f64;
	let mut best: Option<Split> = None;
	for i in 0..n - 1 {
		let label = examples[i].1 as f64;
		left_sum += label;
		left_sum_squares += label * label;
		if examples[i].0 == examples[i + 1].0 {
			continue;
		}
		let n_left = i + 1;
		let n_right = n - n_left;
		if n_left < min_examples_per_leaf || n_right < min_examples_per_leaf {
			continue;
		}
		let left_sse = sse(left_sum, left_sum_squares, n_left);
		let right_sse = sse(
			total_sum - left_sum,
			total_sum_squares - left_sum_squares,
			n_right,
		);
		let gain = (parent_sse - left_sse - right_sse) as f32;
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

/// The sum of squared errors around the mean, from the running sum and sum of squares.
fn sse(sum: f64, sum_squares: f64, n: usize) -> f64 {
	sum_squares - sum * sum / n.to_f64().unwrap()
}
