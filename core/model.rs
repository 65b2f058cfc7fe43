use crate::target::Target;
use ndarray::prelude::*;
use podium_metrics::{Accuracy, RSquared, RSquaredInput, StreamingMetric};

/// A fitted model of any registered kind.
#[derive(Clone, Debug)]
pub enum TrainedModel {
	BinaryClassifier(podium_linear::BinaryClassifier),
	MulticlassClassifier(podium_linear::MulticlassClassifier),
	LinearRegressor(podium_linear::Regressor),
	SupportVectorClassifier(podium_linear::SupportVectorClassifier),
	SupportVectorRegressor(podium_linear::SupportVectorRegressor),
	TreeClassifier(podium_tree::TreeClassifier),
	TreeRegressor(podium_tree::TreeRegressor),
	ForestClassifier(podium_tree::ForestClassifier),
	ForestRegressor(podium_tree::ForestRegressor),
	KNeighborsClassifier(podium_neighbors::KNeighborsClassifier),
	KNeighborsRegressor(podium_neighbors::KNeighborsRegressor),
	GaussianNaiveBayes(podium_bayes::GaussianNaiveBayes),
}

impl TrainedModel {
	pub fn is_classifier(&self) -> bool {
		matches!(
			self,
			TrainedModel::BinaryClassifier(_)
				| TrainedModel::MulticlassClassifier(_)
				| TrainedModel::SupportVectorClassifier(_)
				| TrainedModel::TreeClassifier(_)
				| TrainedModel::ForestClassifier(_)
				| TrainedModel::KNeighborsClassifier(_)
				| TrainedModel::GaussianNaiveBayes(_)
		)
	}

	/// Return the predicted class index for each row of `features`.
	///
	/// Panics if the model is a regressor.
	pub fn predict_classes(&self, features: ArrayView2<f32>) -> Array1<usize> {
		match self {
			TrainedModel::BinaryClassifier(model) => model
				.predict(features)
				.mapv(|probability| if probability >= 0.5 { 1 } else { 0 }),
			TrainedModel::MulticlassClassifier(model) => model.predict(features),
			TrainedModel::SupportVectorClassifier(model) => model
				.predict_decision(features)
				.mapv(|decision| if decision >= 0.0 { 1 } else { 0 }),
			TrainedModel::TreeClassifier(model) => model.predict(features),
			TrainedModel::ForestClassifier(model) => model.predict(features),
			TrainedModel::KNeighborsClassifier(model) => model.predict(features),
			TrainedModel::GaussianNaiveBayes(model) => model.predict(features),
			_ => unreachable!(),
		}
	}

	/// Return the predicted value for each row of `features`.
	///
	/// Panics if the model is a classifier.
	pub fn predict_values(&self, features: ArrayView2<f32>) -> Array1<f32> {
		match self {
			TrainedModel::LinearRegressor(model) => model.predict(features),
			TrainedModel::SupportVectorRegressor(model) => model.predict(features),
			TrainedModel::TreeRegressor(model) => model.predict(features),
			TrainedModel::ForestRegressor(model) => model.predict(features),
			TrainedModel::KNeighborsRegressor(model) => model.predict(features),
			_ => unreachable!(),
		}
	}

	/// Score the model on held-out data. Classifiers are scored with accuracy
	/// and regressors with the coefficient of determination.
	pub fn score(&self, features: ArrayView2<f32>, target: &Target) -> f32 {
		match target {
			Target::Classification { labels, .. } => {
				let predictions = self.predict_classes(features);
				let mut accuracy = Accuracy::new();
				for (prediction, label) in predictions.iter().zip(labels.iter()) {
					accuracy.update((*prediction, *label));
				}
				accuracy.finalize().unwrap_or(0.0)
			}
			Target::Regression { values } => {
				let predictions = self.predict_values(features);
				let mut r_squared = RSquared::default();
				r_squared.update(RSquaredInput {
					predictions: predictions.view(),
					labels: values.view(),
				});
				r_squared.finalize()
			}
		}
	}
}
