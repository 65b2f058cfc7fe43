/*!
This crate is the heart of podium: given a labeled table and a problem type, it trains a configurable set of candidate models in parallel, scores each one on a held-out split, optionally escalates under-performing candidates to a cross-validated hyperparameter search, and returns the best model it found together with its score and the parameters that produced it.

```ignore
use podium_core::{train, Config};

let table = podium_dataframe::from_csv(&mut csv::Reader::from_path("heart.csv").unwrap()).unwrap();
let config = Config::new("diagnosis");
let output = train(&table, &config, &mut |_| {}).unwrap();
println!("{}: {}", output.kind, output.score);
```
*/

#![allow(clippy::tabs_in_doc_comments)]

mod catalog;
mod config;
mod cv;
mod error;
mod evaluate;
mod kinds;
mod model;
mod params;
mod progress;
mod registry;
mod split;
mod target;
mod train;

pub use self::catalog::{expand, search_space, SearchAxis, SearchSpace};
pub use self::config::Config;
pub use self::cv::{cross_validate, KFold};
pub use self::error::Error;
pub use self::evaluate::{evaluate_model, Evaluation, TuningOptions};
pub use self::kinds::{ModelKind, ProblemType};
pub use self::model::TrainedModel;
pub use self::params::{ParamValue, Params};
pub use self::progress::{Progress, ProgressCounter};
pub use self::registry::{default_model_kinds, default_params, fit};
pub use self::split::{train_test_split, TrainTestSplit};
pub use self::target::Target;
pub use self::train::{train, TrainOutput};
