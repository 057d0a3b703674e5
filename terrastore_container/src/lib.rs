//! Terrastore container: persist terrain tiles into an MBTiles file and resume interrupted runs.
//!
//! Building blocks, bottom-up:
//! - [`MBTilesStore`]: the single owner of the `SQLite` container (schema, tile rows, metadata)
//! - [`RenderedIndex`]: in-memory set of coordinates already committed, used to skip work on resume
//! - [`MBTilesSerializer`]: the front door for tile producers, implementing [`TileSerializerTrait`]
//!
//! Producers run on as many threads as they like and share one serializer by reference.
//!
//! # Quick start
//! ```rust,no_run
//! use terrastore_container::*;
//! use terrastore_core::TileCoord;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SerializerConfig::from_path(std::path::Path::new("session.yml"))?;
//!     let serializer = MBTilesSerializer::new(config)?;
//!
//!     std::thread::scope(|scope| {
//!         for x in 0..2 {
//!             let serializer = &serializer;
//!             scope.spawn(move || -> anyhow::Result<()> {
//!                 let coord = TileCoord::new(0, x, 0)?;
//!                 if serializer.must_serialize_coordinate(&coord) {
//!                     serializer.serialize_terrain_tile(&RawTile::new(coord, vec![0u8; 16]))?;
//!                 }
//!                 Ok(())
//!             });
//!         }
//!     });
//!
//!     println!("{}", serializer.stats());
//!     serializer.close();
//!     Ok(())
//! }
//! ```

mod error;
pub use error::*;

pub mod index;
pub use index::*;

pub mod mbtiles;
pub use mbtiles::*;

pub mod serializer;
pub use serializer::*;

pub mod types;
pub use types::*;
