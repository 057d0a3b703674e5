//! Core value types for terrastore.
//!
//! - [`TileCoord`]: a validated (zoom, column, row) triple
//! - [`CoordKey`]: the collision-free 64-bit packing of a [`TileCoord`]
//! - [`Blob`]: an owned byte buffer holding an encoded tile payload
//! - [`TileCompression`] and the [`compress`]/[`decompress`] helpers

pub mod compression;
pub use compression::*;

pub mod types;
pub use types::*;
