use super::{mean_variance::merge_mean_m2, StreamingMetric};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// The coefficient of determination, the proportion of the variance in the labels explained by the predictions. A model that always predicts the label mean scores 0.0 and a perfect model scores 1.0.
#[derive(Debug, Default)]
pub struct RSquared {
	mean_variance: Option<MeanVariance>,
	squared_error: f64,
}

#[derive(Debug)]
struct MeanVariance {
	n: u64,
	mean: f64,
	m2: f64,
}

pub struct RSquaredInput<'a> {
	pub predictions: ArrayView1<'a, f32>,
	pub labels: ArrayView1<'a, f32>,
}

impl<'a> StreamingMetric<'a> for RSquared {
	type Input = RSquaredInput<'a>;
	type Output = f32;

	fn update(&mut self, input: Self::Input) {
		let RSquaredInput {
			predictions,
			labels,
		} = input;
		for (prediction, label) in predictions.iter().zip(labels.iter()) {
			match &mut self.mean_variance {
				Some(mean_variance) => {
					let (mean, m2) = merge_mean_m2(
						mean_variance.n,
						mean_variance.mean,
						mean_variance.m2,
						1,
						*label as f64,
						0.0,
					);
					mean_variance.n += 1;
					mean_variance.mean = mean;
					mean_variance.m2 = m2;
				}
				None => {
					self.mean_variance = Some(MeanVariance {
						n: 1,
						mean: *label as f64,
						m2: 0.0,
					});
				}
			}
			let error = (prediction - label) as f64;
			self.squared_error += error * error;
		}
	}

	fn merge(&mut self, other: Self) {
		match &mut self.mean_variance {
			Some(mean_variance) => {
				if let Some(other) = other.mean_variance {
					let (mean, m2) = merge_mean_m2(
						mean_variance.n,
						mean_variance.mean,
						mean_variance.m2,
						other.n,
						other.mean,
						other.m2,
					);
					mean_variance.mean = mean;
					mean_variance.m2 = m2;
					mean_variance.n += other.n;
				}
			}
			None => {
				self.mean_variance = other.mean_variance;
			}
		}
		self.squared_error += other.squared_error;
	}

	fn finalize(self) -> Self::Output {
		let total_sum_of_squares = match self.mean_variance {
			Some(mean_variance) => mean_variance.m2,
			None => return f32::NAN,
		};
		if total_sum_of_squares == 0.0 {
			// Constant labels carry no variance to explain.
			return if self.squared_error == 0.0 { 1.0 } else { 0.0 };
		}
		(1.0 - self.squared_error / total_sum_of_squares)
			.to_f32()
			.unwrap()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_r_squared_perfect() {
		let mut metric = RSquared::default();
		let labels = arr1(&[1.0f32, 2.0, 3.0, 4.0]);
		metric.update(RSquaredInput {
			predictions: labels.view(),
			labels: labels.view(),
		});
		assert!((metric.finalize() - 1.0).abs() < 1e-6);
	}

	#[test]
	fn test_r_squared_mean_baseline() {
		// Predicting the label mean everywhere scores zero.
		let mut metric = RSquared::default();
		let labels = arr1(&[1.0f32, 2.0, 3.0, 4.0]);
		let predictions = arr1(&[2.5f32, 2.5, 2.5, 2.5]);
		metric.update(RSquaredInput {
			predictions: predictions.view(),
			labels: labels.view(),
		});
		assert!(metric.finalize().abs() < 1e-6);
	}

	#[test]
	fn test_r_squared_merge() {
		let labels = arr1(&[1.0f32, 2.0, 3.0, 4.0]);
		let predictions = arr1(&[1.5f32, 2.0, 2.5, 4.5]);
		let mut whole = RSquared::default();
		whole.update(RSquaredInput {
			predictions: predictions.view(),
			labels: labels.view(),
		});
		let mut left = RSquared::default();
		left.update(RSquaredInput {
			predictions: predictions.slice(s![0..2]),
			labels: labels.slice(s![0..2]),
		});
		let mut right = RSquared::default();
		right.update(RSquaredInput {
			predictions: predictions.slice(s![2..4]),
			labels: labels.slice(s![2..4]),
		});
		left.merge(right);
		assert!((whole.finalize() - left.finalize()).abs() < 1e-6);
	}
}
