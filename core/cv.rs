use crate::{error::Error, kinds::ModelKind, params::Params, registry, target::Target};
use ndarray::prelude::*;

/// Splits `0..n` into contiguous folds. The first `n % n_folds` folds hold one
/// extra row, so every row lands in exactly one validation fold.
pub struct KFold {
	pub n_folds: usize,
}

impl KFold {
	pub fn new(n_folds: usize) -> Self {
		Self {
			n_folds: n_folds.max(2),
		}
	}

	/// Returns `(train_indices, validation_indices)` for each fold.
	pub fn split(&self, n: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
		let n_folds = self.n_folds.min(n).max(1);
		let base = n / n_folds;
		let remainder = n % n_folds;
		let mut folds = Vec::with_capacity(n_folds);
		let mut start = 0;
		for fold_index in 0..n_folds {
			let len = base + if fold_index < remainder { 1 } else { 0 };
			let validation: Vec<usize> = (start..start + len).collect();
			let train: Vec<usize> = (0..start).chain(start + len..n).collect();
			folds.push((train, validation));
			start += len;
		}
		folds
	}
}

/// The mean validation score of `kind` fit with `params` across the folds.
pub fn cross_validate(
	kind: ModelKind,
	params: &Params,
	features: ArrayView2<f32>,
	target: &Target,
	n_folds: usize,
) -> Result<f32, Error> {
	let folds = KFold::new(n_folds).split(features.nrows());
	let mut score_sum = 0.0;
	let n_folds = folds.len();
	for (train_indices, validation_indices) in folds {
		let train_features = features.select(Axis(0), &train_indices);
		let train_target = target.select(&train_indices);
		let validation_features = features.select(Axis(0), &validation_indices);
		let validation_target = target.select(&validation_indices);
		let model = registry::fit(kind, params, train_features.view(), &train_target)?;
		score_sum += model.score(validation_features.view(), &validation_target);
	}
	Ok(score_sum / n_folds as f32)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_kfold_covers_every_row_once() {
		let folds = KFold::new(5).split(23);
		assert_eq!(folds.len(), 5);
		let mut validation: Vec<usize> = folds
			.iter()
			.flat_map(|(_, validation)| validation.iter().copied())
			.collect();
		validation.sort_unstable();
		let expected: Vec<usize> = (0..23).collect();
		assert_eq!(validation, expected);
	}

	#[test]
	fn test_kfold_train_and_validation_are_disjoint() {
		for (train, validation) in KFold::new(4).split(10) {
			for index in validation.iter() {
				assert!(!train.contains(index));
			}
			assert_eq!(train.len() + validation.len(), 10);
		}
	}

	#[test]
	fn test_kfold_caps_at_n_rows() {
		let folds = KFold::new(5).split(3);
		assert_eq!(folds.len(), 3);
	}

	#[test]
	fn test_cross_validate_separable_data() {
		let features = arr2(&[
			[0.0],
			[0.2],
			[0.1],
			[0.3],
			[10.0],
			[10.2],
			[10.1],
			[10.3],
		]);
		let target = Target::Classification {
			labels: arr1(&[0, 0, 0, 0, 1, 1, 1, 1]),
			classes: vec!["a".to_owned(), "b".to_owned()],
		};
		let mut params = Params::new();
		params.insert(
			"n_neighbors".to_owned(),
			crate::params::ParamValue::Int(1),
		);
		let score = cross_validate(
			ModelKind::KNearestNeighborsClassifier,
			&params,
			features.view(),
			&target,
			4,
		)
		.unwrap();
		assert!((score - 1.0).abs() < f32::EPSILON);
	}
}
