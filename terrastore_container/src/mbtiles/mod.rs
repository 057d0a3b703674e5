//! `SQLite` file `*.mbtiles` as tile store
//!
//! - [`MBTilesStore`]: the single owner of the container connection
//! - [`WriteOutcome`]: what happened to one tile insert
//! - [`TeardownReport`]: per-step result of closing the store

mod store;
mod teardown;

pub use store::{MBTilesStore, METADATA_NAME, WriteOutcome};
pub use teardown::{TeardownReport, TeardownStep};
