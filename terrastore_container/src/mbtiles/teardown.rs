use std::fmt;

/// The three steps run when a store is closed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
	/// `ANALYZE` to refresh the query planner statistics.
	Analyze,
	/// Finalize the cached prepared statements.
	FinalizeStatements,
	/// Release the connection.
	Close,
}

impl fmt::Display for TeardownStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			TeardownStep::Analyze => "analyze",
			TeardownStep::FinalizeStatements => "finalize statements",
			TeardownStep::Close => "close",
		})
	}
}

/// Outcome of a best-effort teardown. A failed step never stops the following ones.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeardownReport {
	failures: Vec<(TeardownStep, String)>,
}

impl TeardownReport {
	pub(crate) fn record(&mut self, step: TeardownStep, result: Result<(), String>) {
		if let Err(message) = result {
			log::warn!("tile store teardown: {step} failed: {message}");
			self.failures.push((step, message));
		}
	}

	/// `true` if every step succeeded.
	#[must_use]
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}

	#[must_use]
	pub fn failures(&self) -> &[(TeardownStep, String)] {
		&self.failures
	}
}

impl fmt::Display for TeardownReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.failures.is_empty() {
			return f.write_str("teardown complete");
		}
		let steps = self
			.failures
			.iter()
			.map(|(step, message)| format!("{step}: {message}"))
			.collect::<Vec<_>>()
			.join("; ");
		write!(f, "teardown finished with {} failure(s): {steps}", self.failures.len())
	}
}
