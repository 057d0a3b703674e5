//! Tile producers for tests.

use super::{EncodeTile, TileEncoding};
use anyhow::{Result, bail};
use terrastore_core::{Blob, TileCoord};

/// Encodes to `terrain z/x/y`.
pub struct MockTerrainTile(pub TileCoord);

impl EncodeTile for MockTerrainTile {
	fn coord(&self) -> TileCoord {
		self.0
	}

	fn encode(&self, encoding: &TileEncoding) -> Result<Blob> {
		let TileCoord { level, x, y } = self.0;
		match encoding {
			TileEncoding::Terrain => Ok(Blob::from(format!("terrain {level}/{x}/{y}"))),
			TileEncoding::Mesh { .. } => bail!("terrain tile {:?} cannot be encoded as mesh", self.0),
		}
	}
}

/// Encodes to `mesh z/x/y`, with a `+normals` suffix when requested.
pub struct MockMeshTile(pub TileCoord);

impl EncodeTile for MockMeshTile {
	fn coord(&self) -> TileCoord {
		self.0
	}

	fn encode(&self, encoding: &TileEncoding) -> Result<Blob> {
		let TileCoord { level, x, y } = self.0;
		match encoding {
			TileEncoding::Mesh { vertex_normals: false } => Ok(Blob::from(format!("mesh {level}/{x}/{y}"))),
			TileEncoding::Mesh { vertex_normals: true } => Ok(Blob::from(format!("mesh {level}/{x}/{y}+normals"))),
			TileEncoding::Terrain => bail!("mesh tile {:?} cannot be encoded as terrain", self.0),
		}
	}
}
