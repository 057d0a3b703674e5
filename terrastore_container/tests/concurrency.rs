//! Integration tests for many producer threads sharing one serializer.

use anyhow::Result;
use std::thread;
use tempfile::TempDir;
use terrastore_container::*;
use terrastore_core::*;

const WORKERS: u32 = 8;
const TILES_PER_WORKER: u32 = 64;

#[test]
fn parallel_producers_write_every_tile_once() -> Result<()> {
	let temp_dir = TempDir::new()?;
	let serializer = MBTilesSerializer::new(SerializerConfig::new(temp_dir.path(), "parallel", false))?;

	thread::scope(|scope| -> Result<()> {
		let handles = (0..WORKERS)
			.map(|worker| {
				let serializer = &serializer;
				scope.spawn(move || -> Result<()> {
					for x in 0..TILES_PER_WORKER {
						let coord = TileCoord::new(12, x, worker)?;
						if serializer.must_serialize_coordinate(&coord) {
							serializer.serialize_terrain_tile(&RawTile::new(coord, vec![worker as u8; 32]))?;
						}
						assert!(serializer.has_coordinate(&coord)?);
					}
					Ok(())
				})
			})
			.collect::<Vec<_>>();
		for handle in handles {
			handle.join().expect("worker panicked")?;
		}
		Ok(())
	})?;

	let total = u64::from(WORKERS * TILES_PER_WORKER);
	assert_eq!(serializer.stats().written, total);
	assert_eq!(serializer.store().tile_count()?, total);
	assert_eq!(serializer.index().len() as u64, total);
	assert!(serializer.close().is_clean());
	Ok(())
}

#[test]
fn racing_writes_of_one_coordinate_keep_a_single_row() -> Result<()> {
	let temp_dir = TempDir::new()?;
	let mut config = SerializerConfig::new(temp_dir.path(), "race", false);
	config.tile_compression = TileCompression::Uncompressed;
	let serializer = MBTilesSerializer::new(config)?;
	let coord = TileCoord::new(5, 3, 3)?;

	thread::scope(|scope| {
		for worker in 0..WORKERS {
			let serializer = &serializer;
			scope.spawn(move || {
				let tile = RawTile::new(coord, format!("worker {worker}"));
				assert!(serializer.serialize_terrain_tile(&tile).unwrap());
				// unrelated writes after a rejected duplicate still succeed
				let other = RawTile::new(TileCoord::new(6, worker, 0).unwrap(), "other");
				assert!(serializer.serialize_terrain_tile(&other).unwrap());
			});
		}
	});

	let stats = serializer.stats();
	assert_eq!(stats.written, 1 + u64::from(WORKERS));
	assert_eq!(stats.duplicates, u64::from(WORKERS) - 1);
	assert_eq!(serializer.store().tile_count()?, 1 + u64::from(WORKERS));

	let stored = serializer.store().read_tile(&coord)?.unwrap().to_string_lossy();
	assert!(stored.starts_with("worker "), "{stored}");
	Ok(())
}

#[test]
fn resumed_parallel_run_only_fills_gaps() -> Result<()> {
	let temp_dir = TempDir::new()?;

	let serializer = MBTilesSerializer::new(SerializerConfig::new(temp_dir.path(), "gaps", false))?;
	for x in (0..TILES_PER_WORKER).step_by(2) {
		serializer.serialize_terrain_tile(&RawTile::new(TileCoord::new(8, x, 0)?, "first run"))?;
	}
	serializer.close();

	let serializer = MBTilesSerializer::new(SerializerConfig::new(temp_dir.path(), "gaps", true))?;
	thread::scope(|scope| {
		for worker in 0..4u32 {
			let serializer = &serializer;
			scope.spawn(move || {
				for x in (worker..TILES_PER_WORKER).step_by(4) {
					let coord = TileCoord::new(8, x, 0).unwrap();
					if serializer.must_serialize_coordinate(&coord) {
						serializer
							.serialize_terrain_tile(&RawTile::new(coord, "second run"))
							.unwrap();
					}
				}
			});
		}
	});

	let stats = serializer.stats();
	assert_eq!(stats.skipped, u64::from(TILES_PER_WORKER / 2));
	assert_eq!(stats.written, u64::from(TILES_PER_WORKER / 2));
	assert_eq!(stats.duplicates, 0);
	assert_eq!(serializer.store().tile_count()?, u64::from(TILES_PER_WORKER));
	Ok(())
}
