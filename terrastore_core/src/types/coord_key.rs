//! Bit-packed identity of a [`TileCoord`].
//!
//! Layout of the 64-bit key:
//!
//! ```text
//! bit 63..58  zoom level  (6 bits, 0..=63)
//! bit 57..29  column      (29 bits)
//! bit 28..0   row         (29 bits)
//! ```
//!
//! A zoom-24 pyramid needs at most 25 bits per axis, so the 29-bit fields leave headroom.
//! [`TileCoord::new`] enforces the field widths, which makes [`CoordKey::from`] injective:
//! two different coordinates never share a key.

use crate::{MAX_INDEX, TileCoord};
use std::fmt;

const LEVEL_SHIFT: u32 = 58;
const COLUMN_SHIFT: u32 = 29;
const INDEX_MASK: u64 = MAX_INDEX as u64;

/// Packed `(level << 58) | (x << 29) | y` key of a tile coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(u64);

impl CoordKey {
	/// Pack the three coordinate parts.
	///
	/// Callers that hold raw integers should go through [`TileCoord::new`] first;
	/// this function only asserts the bit budget in debug builds.
	#[must_use]
	pub fn encode(level: u8, x: u32, y: u32) -> CoordKey {
		debug_assert!(level < 64, "level {level} does not fit into 6 bits");
		debug_assert!(x <= MAX_INDEX, "x {x} does not fit into 29 bits");
		debug_assert!(y <= MAX_INDEX, "y {y} does not fit into 29 bits");
		CoordKey((u64::from(level) << LEVEL_SHIFT) | (u64::from(x) << COLUMN_SHIFT) | u64::from(y))
	}

	/// Unpack the key into the coordinate it was built from.
	#[must_use]
	pub fn decode(self) -> TileCoord {
		TileCoord {
			level: (self.0 >> LEVEL_SHIFT) as u8,
			x: ((self.0 >> COLUMN_SHIFT) & INDEX_MASK) as u32,
			y: (self.0 & INDEX_MASK) as u32,
		}
	}

	#[must_use]
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl From<&TileCoord> for CoordKey {
	fn from(coord: &TileCoord) -> Self {
		CoordKey::encode(coord.level, coord.x, coord.y)
	}
}

impl From<TileCoord> for CoordKey {
	fn from(coord: TileCoord) -> Self {
		CoordKey::from(&coord)
	}
}

impl From<CoordKey> for u64 {
	fn from(key: CoordKey) -> Self {
		key.0
	}
}

impl fmt::Debug for CoordKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "CoordKey({:#018x})", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashSet;

	#[rstest]
	#[case(0, 0, 0, 0)]
	#[case(0, 0, 1, 1)]
	#[case(0, 1, 0, 1 << 29)]
	#[case(1, 0, 0, 1 << 58)]
	#[case(1, 1, 0, (1 << 58) | (1 << 29))]
	#[case(31, MAX_INDEX, MAX_INDEX, (31 << 58) | (u64::from(MAX_INDEX) << 29) | u64::from(MAX_INDEX))]
	fn packs_fields(#[case] level: u8, #[case] x: u32, #[case] y: u32, #[case] expected: u64) {
		assert_eq!(CoordKey::encode(level, x, y).as_u64(), expected);
	}

	#[rstest]
	#[case(0, 0, 0)]
	#[case(14, 8803, 5376)]
	#[case(24, 33_554_431, 16_777_215)]
	#[case(31, MAX_INDEX, 0)]
	#[case(31, 0, MAX_INDEX)]
	fn decode_inverts_encode(#[case] level: u8, #[case] x: u32, #[case] y: u32) {
		let coord = TileCoord::new(level, x, y).unwrap();
		assert_eq!(coord.key().decode(), coord);
	}

	#[test]
	fn distinct_coordinates_never_collide() {
		let mut keys = HashSet::new();
		let mut count = 0;
		for level in 0..=6u8 {
			let size = 2u32 << level;
			for x in 0..size {
				for y in 0..size / 2 {
					assert!(keys.insert(CoordKey::encode(level, x, y)), "collision at {level}/{x}/{y}");
					count += 1;
				}
			}
		}
		assert_eq!(keys.len(), count);

		// fields must not bleed into each other at the extremes
		let edges = [
			CoordKey::encode(0, MAX_INDEX, 0),
			CoordKey::encode(0, 0, MAX_INDEX),
			CoordKey::encode(1, 0, 0),
			CoordKey::encode(0, MAX_INDEX, MAX_INDEX),
			CoordKey::encode(31, 0, 0),
		];
		assert_eq!(edges.iter().collect::<HashSet<_>>().len(), edges.len());
	}

	#[test]
	fn debug_format() {
		assert_eq!(format!("{:?}", CoordKey::encode(1, 1, 1)), "CoordKey(0x0400000020000001)");
	}
}
