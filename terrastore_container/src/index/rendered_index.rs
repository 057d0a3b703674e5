//! In-memory set of coordinates already committed to the store.
//!
//! The index is a hint for skipping production work on resume. It is not authoritative:
//! a coordinate missing here may still exist in the store, so existence checks that
//! must be exact fall back to [`MBTilesStore::tile_exists`](crate::MBTilesStore::tile_exists).
//!
//! All access goes through one `RwLock` per index. Reads never mutate.

use crate::MBTilesStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashSet;
use terrastore_core::{CoordKey, TileCoord};
use terrastore_derive::context;

#[derive(Default)]
pub struct RenderedIndex {
	keys: RwLock<HashSet<CoordKey>>,
}

impl RenderedIndex {
	#[must_use]
	pub fn new() -> RenderedIndex {
		RenderedIndex::default()
	}

	pub fn from_keys(keys: impl IntoIterator<Item = CoordKey>) -> RenderedIndex {
		RenderedIndex {
			keys: RwLock::new(keys.into_iter().collect()),
		}
	}

	/// Build the index from every tile row currently in `store`.
	///
	/// An empty store yields an empty index. A failing scan fails the whole load.
	#[context("loading rendered index from {:?}", store.path())]
	pub fn load_all(store: &MBTilesStore) -> Result<RenderedIndex> {
		let keys = store.load_rendered_tiles()?;
		log::debug!("rendered index holds {} tiles", keys.len());
		Ok(RenderedIndex {
			keys: RwLock::new(keys),
		})
	}

	#[must_use]
	pub fn contains(&self, key: CoordKey) -> bool {
		self.keys.read().contains(&key)
	}

	#[must_use]
	pub fn contains_coord(&self, coord: &TileCoord) -> bool {
		self.contains(coord.key())
	}

	/// Add `key`. Returns `false` if it was already present.
	pub fn insert(&self, key: CoordKey) -> bool {
		self.keys.write().insert(key)
	}

	pub fn insert_coord(&self, coord: &TileCoord) -> bool {
		self.insert(coord.key())
	}

	pub fn extend(&self, keys: impl IntoIterator<Item = CoordKey>) {
		self.keys.write().extend(keys);
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.keys.read().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.keys.read().is_empty()
	}
}

impl std::fmt::Debug for RenderedIndex {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RenderedIndex").field("len", &self.len()).finish()
	}
}
