use std::{
	fmt,
	sync::atomic::{AtomicU64, Ordering},
};

/// Snapshot of a serializer's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SerializerStats {
	/// Tiles newly committed (inserted or replaced) in this session.
	pub written: u64,
	/// Coordinates `must_serialize_coordinate` answered `false` for.
	pub skipped: u64,
	/// Writes that hit an existing row and kept the stored payload.
	pub duplicates: u64,
}

impl fmt::Display for SerializerStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} written, {} skipped, {} duplicates",
			self.written, self.skipped, self.duplicates
		)
	}
}

#[derive(Default)]
pub(crate) struct StatsCounter {
	written: AtomicU64,
	skipped: AtomicU64,
	duplicates: AtomicU64,
}

impl StatsCounter {
	pub fn add_written(&self) {
		self.written.fetch_add(1, Ordering::Relaxed);
	}

	pub fn add_skipped(&self) {
		self.skipped.fetch_add(1, Ordering::Relaxed);
	}

	pub fn add_duplicate(&self) {
		self.duplicates.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> SerializerStats {
		SerializerStats {
			written: self.written.load(Ordering::Relaxed),
			skipped: self.skipped.load(Ordering::Relaxed),
			duplicates: self.duplicates.load(Ordering::Relaxed),
		}
	}
}
