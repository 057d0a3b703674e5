//! Durable tile store in an MBTiles (SQLite) container.
//!
//! The `MBTilesStore` owns the only connection to the container file. Every read and
//! write goes through one mutex, so a query can never observe a half-written row and
//! SQLite only ever sees a single writer.
//!
//! ## Schema
//! - `tiles (zoom_level, tile_column, tile_row, tile_data)` with the unique index
//!   `tile_index (zoom_level, tile_column, tile_row)`
//! - `metadata (name, value)` with the unique index `name (name)`
//!
//! Rows are stored with the producer's column and row as given. No XYZ/TMS flip is
//! applied.
//!
//! ## Engine configuration
//! The store is tuned for bulk ingest by one process:
//! `synchronous = OFF`, `locking_mode = EXCLUSIVE`, `journal_mode = DELETE`.
//! A crash may lose the last writes but leaves a consistent file. Other processes
//! cannot read the file while a store is open.
//!
//! ## Example
//! ```rust,no_run
//! use terrastore_container::MBTilesStore;
//! use terrastore_core::{Blob, TileCoord};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = MBTilesStore::open(Path::new("/data/demo.mbtiles"), false)?;
//! let coord = TileCoord::new(0, 0, 0)?;
//! store.write_tile(&coord, &Blob::from("payload"))?;
//! assert!(store.tile_exists(&coord)?);
//! let report = store.close();
//! assert!(report.is_clean());
//! # Ok(())
//! # }
//! ```

use super::{TeardownReport, TeardownStep};
use crate::{DuplicatePolicy, StoreError, StoreOptions};
use anyhow::Result;
use parking_lot::Mutex;
use r2d2_sqlite::rusqlite::{self, Connection, ErrorCode, OptionalExtension, params};
use std::{
	collections::HashSet,
	fmt, fs, io,
	path::{Path, PathBuf},
};
use terrastore_core::{Blob, CoordKey, TileCoord};
use terrastore_derive::context;

/// Name of the single metadata row holding the layer description document.
pub const METADATA_NAME: &str = "layer_json";

const INSERT_TILE: &str = "INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TILE: &str = "UPDATE tiles SET tile_data = ?4 WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3";
const SELECT_EXISTS: &str = "SELECT 1 FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3";
const SELECT_TILE: &str = "SELECT tile_data FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3";

const SCHEMA: [(&str, &str); 4] = [
	(
		"create metadata table",
		"CREATE TABLE IF NOT EXISTS metadata (name TEXT, value TEXT)",
	),
	(
		"create tiles table",
		"CREATE TABLE IF NOT EXISTS tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB)",
	),
	(
		"create metadata index",
		"CREATE UNIQUE INDEX IF NOT EXISTS name ON metadata (name)",
	),
	(
		"create tiles index",
		"CREATE UNIQUE INDEX IF NOT EXISTS tile_index ON tiles (zoom_level, tile_column, tile_row)",
	),
];

/// Result of a single [`MBTilesStore::write_tile`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
	/// A new row was created.
	Inserted,
	/// The coordinate existed and its payload was overwritten (`DuplicatePolicy::Replace`).
	Replaced,
	/// The coordinate existed and the stored payload was kept (`DuplicatePolicy::KeepFirst`).
	Duplicate,
}

/// Single-connection tile store backed by an MBTiles file.
pub struct MBTilesStore {
	path: PathBuf,
	options: StoreOptions,
	connection: Mutex<Option<Connection>>,
}

impl MBTilesStore {
	/// Open a store with default [`StoreOptions`].
	pub fn open(path: &Path, resume: bool) -> Result<MBTilesStore> {
		MBTilesStore::open_with_options(path, resume, StoreOptions::default())
	}

	/// Open or create the container at `path`.
	///
	/// With `resume = false` an existing file is deleted first, so the store always starts
	/// empty. With `resume = true` the existing file is attached and missing tables are
	/// created. Either the store comes back fully configured or an error is returned.
	#[context("opening tile store {:?} (resume: {})", path, resume)]
	pub fn open_with_options(path: &Path, resume: bool, options: StoreOptions) -> Result<MBTilesStore> {
		log::debug!("open tile store {path:?}, resume: {resume}, options: {options:?}");

		if !resume {
			discard(path)?;
		}

		let connection = Connection::open(path).map_err(|source| StoreError::Open {
			path: path.to_path_buf(),
			source,
		})?;
		configure(&connection)?;

		for (step, sql) in SCHEMA {
			connection
				.execute_batch(sql)
				.map_err(|source| StoreError::Configure { step, source })?;
		}

		// compile the write path now, so a broken statement fails the open and not the first tile
		connection
			.prepare_cached(INSERT_TILE)
			.map_err(|source| StoreError::Configure {
				step: "prepare tile insert",
				source,
			})?;

		Ok(MBTilesStore {
			path: path.to_path_buf(),
			options,
			connection: Mutex::new(Some(connection)),
		})
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	#[must_use]
	pub fn options(&self) -> StoreOptions {
		self.options
	}

	/// Run `callback` with the connection while holding the store lock.
	fn with_connection<T>(&self, callback: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
		let guard = self.connection.lock();
		let connection = guard.as_ref().ok_or(StoreError::Closed)?;
		callback(connection)
	}

	/// Insert one tile row through the cached insert statement.
	///
	/// A conflicting coordinate is handled according to [`DuplicatePolicy`]; with the
	/// default policy the first payload stays and [`WriteOutcome::Duplicate`] is returned.
	/// The statement is reset after every execution, successful or not, so a rejected
	/// insert never affects the next call.
	#[context("writing tile {:?} to {:?}", coord, self.path)]
	pub fn write_tile(&self, coord: &TileCoord, blob: &Blob) -> Result<WriteOutcome> {
		log::trace!("write tile {coord:?}, {} bytes", blob.len());

		let write_error = |source| StoreError::Write {
			what: format!("tile {coord:?}"),
			source,
		};

		self.with_connection(|connection| {
			let inserted = connection
				.prepare_cached(INSERT_TILE)
				.and_then(|mut statement| statement.execute(params![coord.level, coord.x, coord.y, blob.as_slice()]));

			match inserted {
				Ok(_) => Ok(WriteOutcome::Inserted),
				Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
					match self.options.on_duplicate {
						DuplicatePolicy::KeepFirst => {
							log::warn!("tile {coord:?} already stored in {:?}, keeping the first payload", self.path);
							Ok(WriteOutcome::Duplicate)
						}
						DuplicatePolicy::Replace => {
							connection
								.prepare_cached(UPDATE_TILE)
								.and_then(|mut statement| {
									statement.execute(params![coord.level, coord.x, coord.y, blob.as_slice()])
								})
								.map_err(write_error)?;
							log::debug!("tile {coord:?} replaced");
							Ok(WriteOutcome::Replaced)
						}
						DuplicatePolicy::Error => Err(write_error(rusqlite::Error::SqliteFailure(err, None)).into()),
					}
				}
				Err(source) => Err(write_error(source).into()),
			}
		})
	}

	/// `true` if a row with this exact coordinate is stored.
	#[context("checking existence of tile {:?} in {:?}", coord, self.path)]
	pub fn tile_exists(&self, coord: &TileCoord) -> Result<bool> {
		self.with_connection(|connection| {
			let exists = connection
				.prepare_cached(SELECT_EXISTS)
				.and_then(|mut statement| statement.exists(params![coord.level, coord.x, coord.y]))
				.map_err(|source| StoreError::Query {
					what: format!("existence of tile {coord:?}"),
					source,
				})?;
			Ok(exists)
		})
	}

	/// Read the stored payload of a tile, if any.
	#[context("reading tile {:?} from {:?}", coord, self.path)]
	pub fn read_tile(&self, coord: &TileCoord) -> Result<Option<Blob>> {
		self.with_connection(|connection| {
			let data = connection
				.prepare_cached(SELECT_TILE)
				.and_then(|mut statement| {
					statement
						.query_row(params![coord.level, coord.x, coord.y], |row| row.get::<_, Vec<u8>>(0))
						.optional()
				})
				.map_err(|source| StoreError::Query {
					what: format!("tile {coord:?}"),
					source,
				})?;
			Ok(data.map(Blob::from))
		})
	}

	#[context("counting tiles in {:?}", self.path)]
	pub fn tile_count(&self) -> Result<u64> {
		self.with_connection(|connection| {
			let count = connection
				.query_row("SELECT COUNT(*) FROM tiles", [], |row| row.get::<_, i64>(0))
				.map_err(|source| StoreError::Query {
					what: String::from("tile count"),
					source,
				})?;
			Ok(count as u64)
		})
	}

	/// Replace the metadata document.
	///
	/// Deletes the previous row and inserts the new one in a single transaction, so
	/// at most one row named [`METADATA_NAME`] exists afterwards.
	#[context("saving metadata ({} bytes) to {:?}", document.len(), self.path)]
	pub fn save_metadata(&self, document: &str) -> Result<()> {
		log::debug!("save metadata, {} bytes", document.len());

		let write_error = |source| StoreError::Write {
			what: format!("metadata '{METADATA_NAME}'"),
			source,
		};

		self.with_connection(|connection| {
			let transaction = connection.unchecked_transaction().map_err(write_error)?;
			transaction
				.execute("DELETE FROM metadata WHERE name = ?1", params![METADATA_NAME])
				.map_err(write_error)?;
			transaction
				.execute(
					"INSERT INTO metadata (name, value) VALUES (?1, ?2)",
					params![METADATA_NAME, document],
				)
				.map_err(write_error)?;
			transaction.commit().map_err(write_error)?;
			Ok(())
		})
	}

	/// Read the metadata document, if one was saved.
	#[context("loading metadata from {:?}", self.path)]
	pub fn load_metadata(&self) -> Result<Option<String>> {
		self.with_connection(|connection| {
			let document = connection
				.query_row(
					"SELECT value FROM metadata WHERE name = ?1",
					params![METADATA_NAME],
					|row| row.get::<_, String>(0),
				)
				.optional()
				.map_err(|source| StoreError::Query {
					what: format!("metadata '{METADATA_NAME}'"),
					source,
				})?;
			Ok(document)
		})
	}

	/// Scan the key columns of every stored tile and pack them into [`CoordKey`]s.
	///
	/// Fails on the first unreadable row or on a coordinate outside the key budget;
	/// a partial result is never returned.
	#[context("loading rendered tiles from {:?}", self.path)]
	pub fn load_rendered_tiles(&self) -> Result<HashSet<CoordKey>> {
		let query_error = |source| StoreError::Query {
			what: String::from("rendered tiles"),
			source,
		};

		self.with_connection(|connection| {
			let mut statement = connection
				.prepare("SELECT zoom_level, tile_column, tile_row FROM tiles")
				.map_err(query_error)?;
			let rows = statement
				.query_map([], |row| {
					Ok((row.get::<_, u8>(0)?, row.get::<_, u32>(1)?, row.get::<_, u32>(2)?))
				})
				.map_err(query_error)?;

			let mut keys = HashSet::new();
			for row in rows {
				let (level, x, y) = row.map_err(query_error)?;
				let coord = TileCoord::new(level, x, y).map_err(|err| StoreError::InvalidRow {
					what: String::from("rendered tiles"),
					message: err.to_string(),
				})?;
				keys.insert(coord.key());
			}

			log::debug!("loaded {} rendered tiles from {:?}", keys.len(), self.path);
			Ok(keys)
		})
	}

	/// Tear the store down: `ANALYZE`, finalize cached statements, close the connection.
	///
	/// Every step runs even if an earlier one failed. Failures are logged and collected
	/// in the returned report; this method never panics or returns an error.
	pub fn close(mut self) -> TeardownReport {
		self.teardown()
	}

	fn teardown(&mut self) -> TeardownReport {
		let mut report = TeardownReport::default();
		let Some(connection) = self.connection.get_mut().take() else {
			return report;
		};

		log::debug!("close tile store {:?}", self.path);

		report.record(
			TeardownStep::Analyze,
			connection.execute_batch("ANALYZE").map_err(|err| err.to_string()),
		);

		// flushing the cache finalizes every statement and has no failure mode to report
		connection.flush_prepared_statement_cache();
		report.record(TeardownStep::FinalizeStatements, Ok(()));

		report.record(
			TeardownStep::Close,
			connection.close().map_err(|(_connection, err)| err.to_string()),
		);

		report
	}
}

impl Drop for MBTilesStore {
	fn drop(&mut self) {
		let report = self.teardown();
		if !report.is_clean() {
			log::warn!("tile store {:?}: {report}", self.path);
		}
	}
}

impl fmt::Debug for MBTilesStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MBTilesStore")
			.field("path", &self.path)
			.field("options", &self.options)
			.finish()
	}
}

/// Delete the container and a leftover rollback journal so a fresh run starts empty.
fn discard(path: &Path) -> Result<(), StoreError> {
	let mut journal = path.as_os_str().to_owned();
	journal.push("-journal");

	for file in [path, Path::new(&journal)] {
		match fs::remove_file(file) {
			Ok(()) => log::debug!("removed existing {file:?}"),
			Err(err) if err.kind() == io::ErrorKind::NotFound => {}
			Err(source) => {
				return Err(StoreError::Discard {
					path: file.to_path_buf(),
					source,
				});
			}
		}
	}
	Ok(())
}

/// Apply the bulk-ingest pragmas and verify the engine accepted them.
fn configure(connection: &Connection) -> Result<(), StoreError> {
	connection
		.execute_batch("PRAGMA synchronous = OFF")
		.map_err(|source| StoreError::Configure {
			step: "synchronous",
			source,
		})?;

	for (step, sql) in [
		("locking_mode", "PRAGMA locking_mode = EXCLUSIVE"),
		("journal_mode", "PRAGMA journal_mode = DELETE"),
	] {
		let mode = connection
			.query_row(sql, [], |row| row.get::<_, String>(0))
			.map_err(|source| StoreError::Configure { step, source })?;
		log::trace!("{step} = {mode}");
	}
	Ok(())
}
