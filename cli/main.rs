//! This module contains the main entrypoint to the podium cli.

use anyhow::{anyhow, Context, Result};
use clap::Clap;
use colored::Colorize;
use podium_core::{Progress, ProgressCounter};
use std::{
	io::Write,
	path::{Path, PathBuf},
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
};

#[derive(Clap)]
#[clap(
	about = "Pick the best model for your dataset.",
	setting = clap::AppSettings::DisableHelpSubcommand,
)]
enum Options {
	#[clap(name = "train")]
	Train(Box<TrainOptions>),
}

#[derive(Clap, Debug)]
#[clap(about = "train and compare models")]
#[clap(long_about = "train every candidate model on a csv file and keep the best one")]
struct TrainOptions {
	#[clap(short, long, about = "the path to your .csv file")]
	file: PathBuf,
	#[clap(short, long, about = "the name of the column to predict")]
	target: String,
	#[clap(long, about = "\"classification\" or \"regression\"")]
	problem_type: Option<String>,
	#[clap(long, about = "a model identifier to evaluate, repeatable")]
	model: Vec<String>,
	#[clap(long, about = "a model identifier to skip, repeatable")]
	exclude: Vec<String>,
	#[clap(long, about = "grid search models that score below the tuning threshold")]
	tune: bool,
	#[clap(short, long, about = "the path to a .yaml config file")]
	config: Option<PathBuf>,
	#[clap(short, long, about = "the path to write the winning model report to")]
	output: Option<PathBuf>,
	#[clap(long = "no-progress", about = "disable progress output", parse(from_flag = std::ops::Not::not))]
	progress: bool,
}

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::Train(options) => cli_train(*options),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_train(options: TrainOptions) -> Result<()> {
	let mut config = load_config(&options)?;
	if let Some(problem_type) = &options.problem_type {
		config.problem_type = problem_type.clone();
	}
	if !options.model.is_empty() {
		config.models = Some(options.model.iter().cloned().collect());
	}
	for name in options.exclude.iter() {
		config.excluded_models.insert(name.clone());
	}
	if options.tune {
		config.hyperparameter_tuning = true;
	}

	let mut reader = csv::Reader::from_path(&options.file)
		.with_context(|| format!("failed to open {}", options.file.display()))?;
	let table = podium_dataframe::from_csv(&mut reader)
		.with_context(|| format!("failed to read {}", options.file.display()))?;

	let mut poller: Option<ProgressPoller> = None;
	let show_progress = options.progress;
	let output = podium_core::train(&table, &config, &mut |progress| {
		if !show_progress {
			return;
		}
		match progress {
			Progress::Splitting => eprintln!("splitting the dataset"),
			Progress::Evaluating(counter) => {
				poller = Some(ProgressPoller::start(counter));
			}
		}
	});
	if let Some(poller) = poller {
		poller.stop();
	}
	let output = output?;

	eprintln!(
		"{}: {} scored {:.4}",
		"winner".green().bold(),
		output.kind,
		output.score
	);
	for (name, value) in output.params.iter() {
		eprintln!("  {} = {}", name, value);
	}

	if let Some(path) = &options.output {
		write_report(path, &output)?;
		eprintln!("The report was written to {}.", path.display());
	}
	Ok(())
}

fn load_config(options: &TrainOptions) -> Result<podium_core::Config> {
	match &options.config {
		Some(path) => {
			let file = std::fs::File::open(path)
				.with_context(|| format!("failed to open {}", path.display()))?;
			let config: podium_core::Config = serde_yaml::from_reader(file)
				.with_context(|| format!("failed to parse {}", path.display()))?;
			if config.target != options.target {
				return Err(anyhow!(
					"the config trains the column \"{}\" but --target names \"{}\"",
					config.target,
					options.target
				));
			}
			Ok(config)
		}
		None => Ok(podium_core::Config::new(options.target.clone())),
	}
}

fn write_report(path: &Path, output: &podium_core::TrainOutput) -> Result<()> {
	let report = serde_json::json!({
		"model": output.kind.as_str(),
		"score": output.score,
		"params": output.params,
	});
	let file = std::fs::File::create(path)
		.with_context(|| format!("failed to create {}", path.display()))?;
	serde_json::to_writer_pretty(file, &report)?;
	Ok(())
}

/// Redraws an `evaluating n/total` line until every model has been scored.
struct ProgressPoller {
	done: Arc<AtomicBool>,
	handle: std::thread::JoinHandle<()>,
}

impl ProgressPoller {
	fn start(counter: ProgressCounter) -> Self {
		let done = Arc::new(AtomicBool::new(false));
		let thread_done = done.clone();
		let handle = std::thread::spawn(move || {
			loop {
				let current = counter.get();
				let total = counter.total();
				eprint!("\revaluating models {}/{}", current, total);
				let _ = std::io::stderr().flush();
				if thread_done.load(Ordering::Relaxed) || current >= total {
					break;
				}
				std::thread::sleep(std::time::Duration::from_millis(100));
			}
			eprintln!();
		});
		Self { done, handle }
	}

	fn stop(self) {
		self.done.store(true, Ordering::Relaxed);
		let _ = self.handle.join();
	}
}
