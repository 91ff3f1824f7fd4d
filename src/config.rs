//! Settings for the schema helpers, the asset catalog and the CLI.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Shape;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "champ-graph.toml";

/// Overrides `assets.dir`.
pub const ASSET_DIR_ENV: &str = "CHAMP_GRAPH_ASSET_DIR";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// `[schema]` table.
	pub schema: SchemaSettings,
	/// `[assets]` table.
	pub assets: AssetSettings,
}

/// How records are interpreted and written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
	/// View tag assumed for edges without a `type`.
	pub default_edge_type: String,
	/// Image shown when a node's `image` fails and it has no `brokenImage`.
	pub fallback_image: String,
	/// Indent written documents.
	pub pretty: bool,
}

/// Where image assets live and how seeded nodes look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
	/// Directory scanned for images.
	pub dir: PathBuf,
	/// Directory the viewer serves from. Image paths are written relative to it.
	pub public_root: PathBuf,
	/// Accepted file extensions, without the dot, matched case-insensitively.
	pub extensions: Vec<String>,
	/// `type` given to seeded nodes.
	pub node_type: String,
	/// Shape given to seeded nodes.
	pub shape: Shape,
}

impl Default for SchemaSettings {
	fn default() -> Self {
		Self {
			default_edge_type: "relMain".to_string(),
			fallback_image: "./assets/other/lol.png".to_string(),
			pretty: true,
		}
	}
}

impl Default for AssetSettings {
	fn default() -> Self {
		Self {
			dir: PathBuf::from("app/assets/champions"),
			public_root: PathBuf::from("app"),
			extensions: ["webp", "png", "jpg", "jpeg"]
				.into_iter()
				.map(String::from)
				.collect(),
			node_type: "champion".to_string(),
			shape: Shape::CircularImage,
		}
	}
}

impl Config {
	/// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, then
	/// apply environment overrides and validate.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let mut config = match path {
			Some(path) => Self::from_file(path)?,
			None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE)?,
			None => Self::default(),
		};
		config.apply_env_overrides();
		config.validate()?;
		Ok(config)
	}

	/// Load a TOML file. Missing keys keep their defaults.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			Error::config(format!("failed to read {}: {}", path.display(), e))
		})?;
		toml::from_str(&contents)
			.map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))
	}

	/// Parse TOML text. Missing keys keep their defaults.
	pub fn from_toml(contents: &str) -> Result<Self> {
		toml::from_str(contents).map_err(|e| Error::config(format!("failed to parse: {e}")))
	}

	fn apply_env_overrides(&mut self) {
		if let Ok(dir) = std::env::var(ASSET_DIR_ENV) {
			log::debug!("config: {ASSET_DIR_ENV} overrides assets.dir with {dir}");
			self.assets.dir = PathBuf::from(dir);
		}
	}

	/// Reject settings no command can work with.
	pub fn validate(&self) -> Result<()> {
		if self.schema.default_edge_type.trim().is_empty() {
			return Err(Error::config("schema.default_edge_type must not be empty"));
		}
		if self.schema.default_edge_type == "all" {
			return Err(Error::config(
				"schema.default_edge_type cannot be \"all\", which names every view",
			));
		}
		if self.assets.extensions.is_empty() {
			return Err(Error::config("assets.extensions must list at least one extension"));
		}
		if let Some(bad) = self
			.assets
			.extensions
			.iter()
			.find(|ext| ext.is_empty() || ext.starts_with('.'))
		{
			return Err(Error::config(format!(
				"assets.extensions entry {bad:?} must be a bare extension like \"webp\""
			)));
		}
		if self.assets.node_type.trim().is_empty() {
			return Err(Error::config("assets.node_type must not be empty"));
		}
		Ok(())
	}
}
