use crate::Blob;
use anyhow::{Context, Result};
use flate2::bufread::{GzDecoder, GzEncoder};
use std::io::Read;
use terrastore_derive::context;

/// Gzip `blob` at the default compression level.
#[context("compressing {} bytes with gzip", blob.len())]
pub fn compress_gzip(blob: &Blob) -> Result<Blob> {
	let mut encoder = GzEncoder::new(blob.as_slice(), flate2::Compression::default());
	let mut compressed = Vec::new();
	encoder.read_to_end(&mut compressed).context("gzip encoder failed")?;
	Ok(Blob::from(compressed))
}

#[context("decompressing {} bytes with gzip", blob.len())]
pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut decompressed = Vec::new();
	decoder.read_to_end(&mut decompressed).context("gzip decoder failed")?;
	Ok(Blob::from(decompressed))
}
