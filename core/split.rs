use num_traits::ToPrimitive;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// Row indices of a shuffled train/test partition.
#[derive(Debug)]
pub struct TrainTestSplit {
	pub train_indices: Vec<usize>,
	pub test_indices: Vec<usize>,
}

/// Shuffle `0..n_rows` with a seeded generator and split off the last
/// `test_fraction` of the shuffled order as the test set. Both halves always
/// hold at least one row.
pub fn train_test_split(n_rows: usize, test_fraction: f32, seed: u64) -> TrainTestSplit {
	let mut indices: Vec<usize> = (0..n_rows).collect();
	let mut rng = Xoshiro256Plus::seed_from_u64(seed);
	indices.shuffle(&mut rng);
	let n_test = (n_rows.to_f32().unwrap() * test_fraction)
		.round()
		.to_usize()
		.unwrap()
		.max(1)
		.min(n_rows - 1);
	let train_indices = indices[0..n_rows - n_test].to_vec();
	let test_indices = indices[n_rows - n_test..].to_vec();
	TrainTestSplit {
		train_indices,
		test_indices,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_split_is_a_partition() {
		let split = train_test_split(100, 0.25, 42);
		assert_eq!(split.train_indices.len(), 75);
		assert_eq!(split.test_indices.len(), 25);
		let mut all: Vec<usize> = split
			.train_indices
			.iter()
			.chain(split.test_indices.iter())
			.copied()
			.collect();
		all.sort_unstable();
		let expected: Vec<usize> = (0..100).collect();
		assert_eq!(all, expected);
	}

	#[test]
	fn test_split_is_deterministic() {
		let a = train_test_split(50, 0.2, 7);
		let b = train_test_split(50, 0.2, 7);
		assert_eq!(a.train_indices, b.train_indices);
		assert_eq!(a.test_indices, b.test_indices);
	}

	#[test]
	fn test_different_seeds_differ() {
		let a = train_test_split(50, 0.2, 7);
		let b = train_test_split(50, 0.2, 8);
		assert_ne!(a.train_indices, b.train_indices);
	}

	#[test]
	fn test_both_halves_nonempty_at_extremes() {
		let split = train_test_split(10, 0.01, 42);
		assert_eq!(split.test_indices.len(), 1);
		let split = train_test_split(10, 0.99, 42);
		assert_eq!(split.train_indices.len(), 1);
	}
}
