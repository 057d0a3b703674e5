//! Transport compression applied to an encoded tile before it is stored.
//!
//! Cesium quantized-mesh and heightmap tiles are conventionally stored gzipped, which
//! is why [`TileCompression::Gzip`] is the default.
//!
//! ```
//! use terrastore_core::TileCompression;
//!
//! assert_eq!(TileCompression::parse_str("gz").unwrap(), TileCompression::Gzip);
//! assert_eq!(TileCompression::Uncompressed.to_string(), "none");
//! ```

use anyhow::{Result, bail};
use serde::Deserialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TileCompression {
	Uncompressed,
	#[default]
	Gzip,
}

impl TileCompression {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			TileCompression::Uncompressed => "none",
			TileCompression::Gzip => "gzip",
		}
	}

	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"gz" | "gzip" => TileCompression::Gzip,
			"none" | "raw" | "uncompressed" => TileCompression::Uncompressed,
			_ => bail!("Unknown tile compression '{value}'. Expected gzip or none"),
		})
	}
}

impl Display for TileCompression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TryFrom<String> for TileCompression {
	type Error = anyhow::Error;

	fn try_from(value: String) -> Result<Self> {
		TileCompression::parse_str(&value)
	}
}
