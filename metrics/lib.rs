/*!
This crate defines the [`StreamingMetric`](trait.StreamingMetric.html) trait and the concrete metrics podium uses to compare candidate models: [`Accuracy`](struct.Accuracy.html) for classification and [`RSquared`](struct.RSquared.html) for regression.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod accuracy;
mod mean;
mod mean_variance;
mod r_squared;

pub use self::accuracy::Accuracy;
pub use self::mean::Mean;
pub use self::mean_variance::merge_mean_m2;
pub use self::r_squared::{RSquared, RSquaredInput};

/**
The `StreamingMetric` trait defines a common interface to metrics that can be computed in a streaming manner, where the input arrives in chunks.

After being initialized, a value implementing `StreamingMetric` can have `update()` called on it with values of the associated type `Input`. Multiple values can be combined by calling `merge()`, which is useful when a metric is computed across multiple threads. When finished aggregating, call `finalize()` to produce the associated type `Output`.
*/
pub trait StreamingMetric<'a> {
	type Input;
	type Output;
	fn update(&mut self, input: Self::Input);
	fn merge(&mut self, other: Self);
	fn finalize(self) -> Self::Output;
}
