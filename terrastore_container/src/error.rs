//! Failure classes of the tile store.
//!
//! Every fallible operation returns `anyhow::Result`; a [`StoreError`] sits at the root
//! of the error chain so callers can tell open, write and query failures apart:
//!
//! ```rust,no_run
//! use terrastore_container::{MBTilesStore, StoreError};
//! use std::path::Path;
//!
//! let err = MBTilesStore::open(Path::new("/no/such/dir/demo.mbtiles"), false).unwrap_err();
//! assert!(err.downcast_ref::<StoreError>().is_some_and(StoreError::is_open_error));
//! ```
//!
//! Duplicate inserts and teardown problems are not errors: they are reported through
//! [`WriteOutcome::Duplicate`](crate::WriteOutcome) and [`TeardownReport`](crate::TeardownReport).

use r2d2_sqlite::rusqlite;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
	/// The container file cannot be created or attached.
	#[error("cannot open tile store {path:?}: {source}")]
	Open { path: PathBuf, source: rusqlite::Error },

	/// A fresh run could not discard the existing container file.
	#[error("cannot remove existing tile store {path:?}: {source}")]
	Discard { path: PathBuf, source: io::Error },

	/// A pragma or schema statement was rejected while opening.
	#[error("cannot configure tile store ({step}): {source}")]
	Configure { step: &'static str, source: rusqlite::Error },

	/// A metadata replace or a tile insert was rejected.
	#[error("cannot write {what}: {source}")]
	Write { what: String, source: rusqlite::Error },

	/// An existence, read or bulk-load query failed.
	#[error("cannot query {what}: {source}")]
	Query { what: String, source: rusqlite::Error },

	/// A query returned a row that does not describe a valid tile.
	#[error("cannot query {what}: {message}")]
	InvalidRow { what: String, message: String },

	/// The store was already torn down.
	#[error("tile store is closed")]
	Closed,
}

impl StoreError {
	/// `true` for failures that prevent a session from being opened.
	#[must_use]
	pub fn is_open_error(&self) -> bool {
		matches!(
			self,
			StoreError::Open { .. } | StoreError::Discard { .. } | StoreError::Configure { .. }
		)
	}

	#[must_use]
	pub fn is_write_error(&self) -> bool {
		matches!(self, StoreError::Write { .. })
	}

	#[must_use]
	pub fn is_query_error(&self) -> bool {
		matches!(self, StoreError::Query { .. } | StoreError::InvalidRow { .. })
	}

	/// `true` for a tile insert rejected by the unique `(zoom, column, row)` index.
	#[must_use]
	pub fn is_duplicate(&self) -> bool {
		matches!(
			self,
			StoreError::Write {
				source: rusqlite::Error::SqliteFailure(err, _),
				..
			} if err.code == rusqlite::ErrorCode::ConstraintViolation
		)
	}
}
