//! Producer-facing tile contract.
//!
//! A producer hands the serializer anything that implements [`EncodeTile`]. The
//! serializer never inspects tile content; it only asks for the coordinate and for the
//! encoded bytes under a [`TileEncoding`].

use anyhow::Result;
use terrastore_core::{Blob, TileCoord};

/// Kind-specific options for encoding one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEncoding {
	/// Raster heightmap tile. No options.
	Terrain,
	/// Quantized mesh tile, optionally with the per-vertex normals extension.
	Mesh { vertex_normals: bool },
}

impl TileEncoding {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			TileEncoding::Terrain => "terrain",
			TileEncoding::Mesh { .. } => "mesh",
		}
	}
}

/// A fully produced tile that can turn itself into bytes.
pub trait EncodeTile: Send + Sync {
	fn coord(&self) -> TileCoord;

	/// Encoded payload, before transport compression.
	fn encode(&self, encoding: &TileEncoding) -> Result<Blob>;
}

/// A tile whose payload is already encoded. The encoding options are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTile {
	pub coord: TileCoord,
	pub data: Blob,
}

impl RawTile {
	pub fn new(coord: TileCoord, data: impl Into<Blob>) -> RawTile {
		RawTile {
			coord,
			data: data.into(),
		}
	}
}

impl EncodeTile for RawTile {
	fn coord(&self) -> TileCoord {
		self.coord
	}

	fn encode(&self, _encoding: &TileEncoding) -> Result<Blob> {
		Ok(self.data.clone())
	}
}
