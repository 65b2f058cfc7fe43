use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

/// Reported to the progress callback as training advances.
#[derive(Clone, Debug)]
pub enum Progress {
	Splitting,
	Evaluating(ProgressCounter),
}

/// A shared counter the evaluation workers increment and the caller polls.
#[derive(Clone, Debug)]
pub struct ProgressCounter {
	current: Arc<AtomicU64>,
	total: u64,
}

impl ProgressCounter {
	pub fn new(total: u64) -> Self {
		Self {
			current: Arc::new(AtomicU64::new(0)),
			total,
		}
	}

	pub fn get(&self) -> u64 {
		self.current.load(Ordering::Relaxed)
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn inc(&self, amount: u64) {
		self.current.fetch_add(amount, Ordering::Relaxed);
	}

	pub fn fraction(&self) -> f32 {
		if self.total == 0 {
			1.0
		} else {
			self.get() as f32 / self.total as f32
		}
	}
}
