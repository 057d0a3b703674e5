mod mbtiles_serializer;
mod stats;
mod tile;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use mbtiles_serializer::MBTilesSerializer;
pub use stats::SerializerStats;
pub use tile::{EncodeTile, RawTile, TileEncoding};
pub use traits::TileSerializerTrait;
