//! Payload compression used by the serializer before a tile is stored.

mod gzip;

pub use gzip::{compress_gzip, decompress_gzip};

use crate::{Blob, TileCompression};
use anyhow::Result;

/// Compress `blob` with the given method. `Uncompressed` returns the input unchanged.
pub fn compress(blob: Blob, compression: TileCompression) -> Result<Blob> {
	match compression {
		TileCompression::Uncompressed => Ok(blob),
		TileCompression::Gzip => compress_gzip(&blob),
	}
}

/// Reverse of [`compress`].
pub fn decompress(blob: Blob, compression: TileCompression) -> Result<Blob> {
	match compression {
		TileCompression::Uncompressed => Ok(blob),
		TileCompression::Gzip => decompress_gzip(&blob),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn uncompressed_is_identity() -> Result<()> {
		let blob = Blob::from("heightmap");
		assert_eq!(compress(blob.clone(), TileCompression::Uncompressed)?, blob);
		assert_eq!(decompress(blob.clone(), TileCompression::Uncompressed)?, blob);
		Ok(())
	}

	#[test]
	fn gzip_dispatch() -> Result<()> {
		let blob = Blob::from(vec![7u8; 4096]);
		let compressed = compress(blob.clone(), TileCompression::Gzip)?;
		assert_eq!(&compressed.as_slice()[..2], &[0x1f, 0x8b]);
		assert!(compressed.len() < blob.len());
		assert_eq!(decompress(compressed, TileCompression::Gzip)?, blob);
		Ok(())
	}
}
