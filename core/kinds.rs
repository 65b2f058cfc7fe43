use crate::error::Error;

/// Whether the target column holds discrete classes or continuous values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProblemType {
	Classification,
	Regression,
}

impl ProblemType {
	pub fn parse(s: &str) -> Result<Self, Error> {
		match s {
			"classification" => Ok(ProblemType::Classification),
			"regression" => Ok(ProblemType::Regression),
			_ => Err(Error::UnsupportedProblemType(s.to_owned())),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ProblemType::Classification => "classification",
			ProblemType::Regression => "regression",
		}
	}
}

impl std::fmt::Display for ProblemType {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Every model the trainer knows how to fit.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ModelKind {
	DecisionTreeClassifier,
	DecisionTreeRegressor,
	GaussianNaiveBayes,
	KNearestNeighborsClassifier,
	KNearestNeighborsRegressor,
	LinearRegression,
	LogisticRegression,
	RandomForestClassifier,
	RandomForestRegressor,
	SupportVectorClassifier,
	SupportVectorRegressor,
}

impl ModelKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ModelKind::DecisionTreeClassifier => "decision_tree_classifier",
			ModelKind::DecisionTreeRegressor => "decision_tree_regressor",
			ModelKind::GaussianNaiveBayes => "gaussian_naive_bayes",
			ModelKind::KNearestNeighborsClassifier => "k_nearest_neighbors_classifier",
			ModelKind::KNearestNeighborsRegressor => "k_nearest_neighbors_regressor",
			ModelKind::LinearRegression => "linear_regression",
			ModelKind::LogisticRegression => "logistic_regression",
			ModelKind::RandomForestClassifier => "random_forest_classifier",
			ModelKind::RandomForestRegressor => "random_forest_regressor",
			ModelKind::SupportVectorClassifier => "support_vector_classifier",
			ModelKind::SupportVectorRegressor => "support_vector_regressor",
		}
	}

	pub fn from_str(s: &str) -> Option<Self> {
		match s {
			"decision_tree_classifier" => Some(ModelKind::DecisionTreeClassifier),
			"decision_tree_regressor" => Some(ModelKind::DecisionTreeRegressor),
			"gaussian_naive_bayes" => Some(ModelKind::GaussianNaiveBayes),
			"k_nearest_neighbors_classifier" => Some(ModelKind::KNearestNeighborsClassifier),
			"k_nearest_neighbors_regressor" => Some(ModelKind::KNearestNeighborsRegressor),
			"linear_regression" => Some(ModelKind::LinearRegression),
			"logistic_regression" => Some(ModelKind::LogisticRegression),
			"random_forest_classifier" => Some(ModelKind::RandomForestClassifier),
			"random_forest_regressor" => Some(ModelKind::RandomForestRegressor),
			"support_vector_classifier" => Some(ModelKind::SupportVectorClassifier),
			"support_vector_regressor" => Some(ModelKind::SupportVectorRegressor),
			_ => None,
		}
	}

	pub fn problem_type(&self) -> ProblemType {
		match self {
			ModelKind::DecisionTreeClassifier
			| ModelKind::GaussianNaiveBayes
			| ModelKind::KNearestNeighborsClassifier
			| ModelKind::LogisticRegression
			| ModelKind::RandomForestClassifier
			| ModelKind::SupportVectorClassifier => ProblemType::Classification,
			ModelKind::DecisionTreeRegressor
			| ModelKind::KNearestNeighborsRegressor
			| ModelKind::LinearRegression
			| ModelKind::RandomForestRegressor
			| ModelKind::SupportVectorRegressor => ProblemType::Regression,
		}
	}
}

impl std::fmt::Display for ModelKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse_problem_type() {
		assert_eq!(
			ProblemType::parse("classification").unwrap(),
			ProblemType::Classification
		);
		assert_eq!(
			ProblemType::parse("regression").unwrap(),
			ProblemType::Regression
		);
		assert!(matches!(
			ProblemType::parse("ranking"),
			Err(Error::UnsupportedProblemType(_))
		));
	}

	#[test]
	fn test_model_kind_round_trip() {
		let kinds = [
			ModelKind::DecisionTreeClassifier,
			ModelKind::DecisionTreeRegressor,
			ModelKind::GaussianNaiveBayes,
			ModelKind::KNearestNeighborsClassifier,
			ModelKind::KNearestNeighborsRegressor,
			ModelKind::LinearRegression,
			ModelKind::LogisticRegression,
			ModelKind::RandomForestClassifier,
			ModelKind::RandomForestRegressor,
			ModelKind::SupportVectorClassifier,
			ModelKind::SupportVectorRegressor,
		];
		for kind in kinds.iter() {
			assert_eq!(ModelKind::from_str(kind.as_str()), Some(*kind));
		}
		assert_eq!(ModelKind::from_str("perceptron"), None);
	}
}
