//! Three-dimensional tile coordinates of a terrain or mesh pyramid
//!
//! A [`TileCoord`] identifies exactly one tile of a dataset. Construction validates the
//! coordinate against the bit budget of [`CoordKey`](crate::CoordKey), so every
//! `TileCoord` that exists can be packed without aliasing another one.
//!
//! Column and row are not limited to `2^level`. Geodetic terrain
//! pyramids start with two root tiles, so a column may reach `2^(level + 1) - 1`.
//!
//! # Examples
//!
//! ```
//! use terrastore_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.level, 5);
//! assert_eq!(coord.x, 6);
//! assert_eq!(coord.y, 7);
//!
//! assert!(TileCoord::new(32, 0, 0).is_err());
//! ```

use crate::CoordKey;
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// Highest zoom level accepted by [`TileCoord::new`].
pub const MAX_LEVEL: u8 = 31;

/// Highest column or row index accepted by [`TileCoord::new`] (29 bits).
pub const MAX_INDEX: u32 = (1 << 29) - 1;

/// A tile coordinate with zoom level, column (`x`) and row (`y`).
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The column of the tile.
	pub x: u32,
	/// The row of the tile.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or `x`/`y` need more than 29 bits.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		ensure!(x <= MAX_INDEX, "x ({x}) must be <= {MAX_INDEX}");
		ensure!(y <= MAX_INDEX, "y ({y}) must be <= {MAX_INDEX}");
		Ok(TileCoord { level, x, y })
	}

	/// Pack this coordinate into its [`CoordKey`].
	#[must_use]
	pub fn key(&self) -> CoordKey {
		CoordKey::from(self)
	}
}

/// Formats as `TileCoord(z, [x, y])`.
impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl TryFrom<(u8, u32, u32)> for TileCoord {
	type Error = anyhow::Error;

	fn try_from((level, x, y): (u8, u32, u32)) -> Result<Self> {
		TileCoord::new(level, x, y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, 0, 0)]
	#[case(0, 1, 0)]
	#[case(24, 33_554_431, 16_777_215)]
	#[case(31, MAX_INDEX, MAX_INDEX)]
	fn accepts_coordinates_inside_budget(#[case] level: u8, #[case] x: u32, #[case] y: u32) {
		let coord = TileCoord::new(level, x, y).unwrap();
		assert_eq!((coord.level, coord.x, coord.y), (level, x, y));
	}

	#[rstest]
	#[case(32, 0, 0, "level (32) must be <= 31")]
	#[case(5, MAX_INDEX + 1, 0, "x (536870912) must be <= 536870911")]
	#[case(5, 0, u32::MAX, "y (4294967295) must be <= 536870911")]
	fn rejects_coordinates_outside_budget(#[case] level: u8, #[case] x: u32, #[case] y: u32, #[case] message: &str) {
		let err = TileCoord::new(level, x, y).unwrap_err();
		assert_eq!(err.to_string(), message);
	}

	#[test]
	fn debug_format() {
		let coord = TileCoord::new(3, 1, 2).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(3, [1, 2])");
	}

	#[test]
	fn try_from_tuple() {
		assert_eq!(TileCoord::try_from((1, 1, 0)).unwrap(), TileCoord::new(1, 1, 0).unwrap());
		assert!(TileCoord::try_from((40, 0, 0)).is_err());
	}
}
