use super::{EncodeTile, TileEncoding};
use anyhow::Result;
use terrastore_core::TileCoord;

/// Capabilities a tile producer needs from a serializer backend:
/// accept terrain tiles, accept mesh tiles, accept the metadata document.
pub trait TileSerializerTrait: Send + Sync {
	/// Session-scoped setup. Does nothing unless a backend needs it.
	fn start_serialization(&self) -> Result<()> {
		Ok(())
	}

	/// Session-scoped teardown hook. Does nothing unless a backend needs it.
	fn end_serialization(&self) -> Result<()> {
		Ok(())
	}

	/// Cheap in-memory check whether `coord` still has to be produced.
	fn must_serialize_coordinate(&self, coord: &TileCoord) -> bool;

	/// Authoritative existence check; may hit the backing store.
	fn has_coordinate(&self, coord: &TileCoord) -> Result<bool>;

	/// Encode `tile` with `encoding` and hand it to the store.
	///
	/// Returns `true` once the store accepted the tile, including the case where it
	/// kept an earlier payload for the same coordinate.
	fn serialize_tile(&self, tile: &dyn EncodeTile, encoding: &TileEncoding) -> Result<bool>;

	fn save_metadata(&self, document: &str) -> Result<()>;

	fn serialize_terrain_tile(&self, tile: &dyn EncodeTile) -> Result<bool> {
		self.serialize_tile(tile, &TileEncoding::Terrain)
	}

	fn serialize_mesh_tile(&self, tile: &dyn EncodeTile, vertex_normals: bool) -> Result<bool> {
		self.serialize_tile(tile, &TileEncoding::Mesh { vertex_normals })
	}
}
