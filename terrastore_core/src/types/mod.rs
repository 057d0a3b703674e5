mod blob;
mod coord_key;
mod tile_compression;
mod tile_coord;

pub use blob::Blob;
pub use coord_key::CoordKey;
pub use tile_compression::TileCompression;
pub use tile_coord::{MAX_INDEX, MAX_LEVEL, TileCoord};
