use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};
use terrastore_core::TileCompression;

/// What the store does when a tile insert hits an existing `(zoom, column, row)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// Keep the stored payload, log a warning and continue.
	#[default]
	KeepFirst,
	/// Overwrite the stored payload with the new one.
	Replace,
	/// Fail the write with a `StoreError::Write`.
	Error,
}

/// Options applied when opening an `MBTilesStore`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
	pub on_duplicate: DuplicatePolicy,
}

/// Session configuration of an `MBTilesSerializer`.
///
/// ```yaml
/// output_dir: /data/terrain
/// dataset_name: alps
/// resume: true
/// tile_compression: gzip
/// on_duplicate: keep_first
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SerializerConfig {
	/// Directory that holds the container file.
	pub output_dir: PathBuf,

	/// Container file stem; the file is `<output_dir>/<dataset_name>.<extension>`.
	pub dataset_name: String,

	/// Reuse tiles of an existing container instead of starting empty.
	#[serde(default)]
	pub resume: bool,

	/// File extension of the container.
	#[serde(default = "default_extension")]
	pub extension: String,

	/// Compression applied to every encoded tile before it is stored.
	#[serde(default)]
	pub tile_compression: TileCompression,

	#[serde(default)]
	pub on_duplicate: DuplicatePolicy,

	/// Record every committed coordinate in the rendered index.
	#[serde(default = "default_true")]
	pub track_written: bool,
}

fn default_extension() -> String {
	String::from("mbtiles")
}

fn default_true() -> bool {
	true
}

impl SerializerConfig {
	pub fn new(output_dir: impl Into<PathBuf>, dataset_name: &str, resume: bool) -> Self {
		Self {
			output_dir: output_dir.into(),
			dataset_name: dataset_name.to_string(),
			resume,
			extension: default_extension(),
			tile_compression: TileCompression::default(),
			on_duplicate: DuplicatePolicy::default(),
			track_written: true,
		}
	}

	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: SerializerConfig = serde_yaml_ng::from_reader(reader)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: SerializerConfig = serde_yaml_ng::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Parse a YAML file. A relative `output_dir` is resolved against the file's directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config {path:?}"))?;
		let mut config = SerializerConfig::from_reader(BufReader::new(file))?;
		if config.output_dir.is_relative() {
			if let Some(base) = path.parent() {
				config.output_dir = base.join(&config.output_dir);
			}
		}
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(!self.dataset_name.is_empty(), "dataset_name must not be empty");
		ensure!(
			!self.dataset_name.contains(['/', '\\']),
			"dataset_name '{}' must not contain path separators",
			self.dataset_name
		);
		ensure!(!self.extension.is_empty(), "extension must not be empty");
		Ok(())
	}

	/// `<output_dir>/<dataset_name>.<extension>`
	#[must_use]
	pub fn container_path(&self) -> PathBuf {
		self.output_dir.join(format!("{}.{}", self.dataset_name, self.extension))
	}

	#[must_use]
	pub fn store_options(&self) -> StoreOptions {
		StoreOptions {
			on_duplicate: self.on_duplicate,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::{TempDir, prelude::*};
	use pretty_assertions::assert_eq;

	#[test]
	fn minimal_yaml_uses_defaults() -> Result<()> {
		let config = SerializerConfig::from_string("output_dir: /data\ndataset_name: demo\n")?;
		assert_eq!(config, SerializerConfig::new("/data", "demo", false));
		assert_eq!(config.container_path(), PathBuf::from("/data/demo.mbtiles"));
		Ok(())
	}

	#[test]
	fn full_yaml() -> Result<()> {
		let config = SerializerConfig::from_string(
			"output_dir: /data\n\
			dataset_name: alps\n\
			resume: true\n\
			extension: db\n\
			tile_compression: none\n\
			on_duplicate: replace\n\
			track_written: false\n",
		)?;
		assert_eq!(
			config,
			SerializerConfig {
				output_dir: PathBuf::from("/data"),
				dataset_name: String::from("alps"),
				resume: true,
				extension: String::from("db"),
				tile_compression: TileCompression::Uncompressed,
				on_duplicate: DuplicatePolicy::Replace,
				track_written: false,
			}
		);
		assert_eq!(config.container_path(), PathBuf::from("/data/alps.db"));
		assert_eq!(config.store_options().on_duplicate, DuplicatePolicy::Replace);
		Ok(())
	}

	#[test]
	fn rejects_unknown_fields_and_bad_names() {
		assert!(SerializerConfig::from_string("output_dir: /d\ndataset_name: a\nworkers: 4\n").is_err());
		assert!(SerializerConfig::from_string("output_dir: /d\ndataset_name: ''\n").is_err());
		assert!(SerializerConfig::from_string("output_dir: /d\ndataset_name: a/b\n").is_err());
		assert!(SerializerConfig::from_string("output_dir: /d\ndataset_name: a\ntile_compression: lzma\n").is_err());
	}

	#[test]
	fn relative_output_dir_is_resolved_against_config_file() -> Result<()> {
		let dir = TempDir::new()?;
		let file = dir.child("session.yml");
		file.write_str("output_dir: tiles\ndataset_name: demo\nresume: true\n")?;

		let config = SerializerConfig::from_path(file.path())?;
		assert_eq!(config.output_dir, dir.path().join("tiles"));
		assert!(config.resume);
		Ok(())
	}
}
