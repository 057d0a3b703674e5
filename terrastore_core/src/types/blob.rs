//! Owned byte buffer for encoded tile payloads.
//!
//! The store never looks inside a [`Blob`]; it is written to and read from the
//! `tile_data` column byte for byte.
//!
//! ```rust
//! use terrastore_core::Blob;
//!
//! let blob = Blob::from(&[0x1f, 0x8b, 0x08]);
//! assert_eq!(blob.len(), 3);
//! assert_eq!(format!("{blob:?}"), "Blob(3): 1f 8b 08");
//! ```

use std::fmt::Debug;

/// A thin wrapper around `Vec<u8>`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Interpret the bytes as UTF-8, replacing invalid sequences.
	#[must_use]
	pub fn to_string_lossy(&self) -> String {
		String::from_utf8_lossy(&self.0).into_owned()
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(item: String) -> Self {
		Blob(item.into_bytes())
	}
}

/// Prints the length, followed by at most the first 16 bytes in hex.
impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let head = &self.0[..self.0.len().min(16)];
		let hex = head.iter().map(|byte| format!("{byte:02x}")).collect::<Vec<_>>().join(" ");
		if self.0.len() > 16 {
			write!(f, "Blob({}): {hex} …", self.0.len())
		} else {
			write!(f, "Blob({}): {hex}", self.0.len())
		}
	}
}
