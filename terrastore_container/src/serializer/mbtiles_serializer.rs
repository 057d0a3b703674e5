//! Front door for tile producers writing into one `*.mbtiles` container.
//!
//! An [`MBTilesSerializer`] owns one [`MBTilesStore`] and one [`RenderedIndex`] for the
//! whole session. Producers share it by reference across worker threads:
//!
//! ```rust,no_run
//! use terrastore_container::*;
//! use terrastore_core::TileCoord;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = SerializerConfig::new("/data/terrain", "alps", true);
//!     let serializer = MBTilesSerializer::new(config)?;
//!
//!     let coord = TileCoord::new(0, 0, 0)?;
//!     if serializer.must_serialize_coordinate(&coord) {
//!         serializer.serialize_terrain_tile(&RawTile::new(coord, vec![0u8; 64]))?;
//!     }
//!     serializer.save_metadata("{\"tilejson\":\"2.1.0\"}")?;
//!
//!     let report = serializer.close();
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

use super::{EncodeTile, SerializerStats, TileEncoding, TileSerializerTrait, stats::StatsCounter};
use crate::{MBTilesStore, RenderedIndex, SerializerConfig, StoreError, TeardownReport, WriteOutcome};
use anyhow::{Context, Result};
use std::fmt;
use terrastore_core::{TileCoord, compress};
use terrastore_derive::context;

pub struct MBTilesSerializer {
	config: SerializerConfig,
	store: MBTilesStore,
	index: RenderedIndex,
	stats: StatsCounter,
}

impl MBTilesSerializer {
	/// Open the container `<output_dir>/<dataset_name>.<extension>`.
	///
	/// A fresh session discards any existing file. A resumed session keeps the file and
	/// loads every stored coordinate into the rendered index; if that scan fails, no
	/// serializer is returned.
	pub fn new(config: SerializerConfig) -> Result<MBTilesSerializer> {
		config.validate().context("validating serializer config")?;
		let path = config.container_path();
		let store = MBTilesStore::open_with_options(&path, config.resume, config.store_options())?;

		let index = if config.resume {
			let index = RenderedIndex::load_all(&store)?;
			log::debug!("resuming {path:?} with {} rendered tiles", index.len());
			index
		} else {
			RenderedIndex::new()
		};

		Ok(MBTilesSerializer {
			config,
			store,
			index,
			stats: StatsCounter::default(),
		})
	}

	#[must_use]
	pub fn config(&self) -> &SerializerConfig {
		&self.config
	}

	#[must_use]
	pub fn store(&self) -> &MBTilesStore {
		&self.store
	}

	#[must_use]
	pub fn index(&self) -> &RenderedIndex {
		&self.index
	}

	#[must_use]
	pub fn stats(&self) -> SerializerStats {
		self.stats.snapshot()
	}

	/// Log the session summary and tear the store down.
	pub fn close(self) -> TeardownReport {
		log::info!("closing {:?}: {}", self.store.path(), self.stats());
		self.store.close()
	}

	fn record(&self, coord: &TileCoord) {
		if self.config.track_written {
			self.index.insert_coord(coord);
		}
	}
}

impl TileSerializerTrait for MBTilesSerializer {
	fn must_serialize_coordinate(&self, coord: &TileCoord) -> bool {
		if !self.config.resume {
			return true;
		}
		if self.index.contains_coord(coord) {
			self.stats.add_skipped();
			return false;
		}
		true
	}

	#[context("checking whether {coord:?} exists")]
	fn has_coordinate(&self, coord: &TileCoord) -> Result<bool> {
		if self.index.contains_coord(coord) {
			return Ok(true);
		}
		self.store.tile_exists(coord)
	}

	#[context("serializing {} tile", encoding.as_str())]
	fn serialize_tile(&self, tile: &dyn EncodeTile, encoding: &TileEncoding) -> Result<bool> {
		let coord = tile.coord();
		let blob = compress(tile.encode(encoding)?, self.config.tile_compression)?;

		let outcome = match self.store.write_tile(&coord, &blob) {
			Ok(outcome) => outcome,
			Err(err) => {
				// a rejected duplicate still means the coordinate is stored
				if err.downcast_ref::<StoreError>().is_some_and(StoreError::is_duplicate) {
					self.stats.add_duplicate();
					self.record(&coord);
				}
				return Err(err);
			}
		};

		match outcome {
			WriteOutcome::Inserted | WriteOutcome::Replaced => self.stats.add_written(),
			WriteOutcome::Duplicate => self.stats.add_duplicate(),
		}
		self.record(&coord);
		Ok(true)
	}

	fn save_metadata(&self, document: &str) -> Result<()> {
		self.store.save_metadata(document)
	}
}

impl fmt::Debug for MBTilesSerializer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MBTilesSerializer")
			.field("store", &self.store)
			.field("index", &self.index)
			.field("stats", &self.stats())
			.finish()
	}
}
