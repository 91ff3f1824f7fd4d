//! Image assets available to nodes.
//!
//! The schema treats `image`/`brokenImage` as opaque strings and never looks
//! at the filesystem. This module is the collaborator that does: it lists the
//! images in a champion-style asset directory and can seed one node per file.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};

use crate::config::AssetSettings;
use crate::error::Result;
use crate::schema::{Graph, Node};

/// One image file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
	/// File name with extension, e.g. `Aatrox.webp`.
	pub file_name: String,
	/// File name without extension, e.g. `Aatrox`.
	pub stem: String,
	/// Location as found by the scan, `dir` joined with `file_name`.
	pub path: PathBuf,
}

/// Image files in one directory, sorted by file name.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
	/// Directory that was scanned.
	pub dir: PathBuf,
	/// Matching files, sorted by file name.
	pub assets: Vec<Asset>,
}

impl AssetCatalog {
	/// List regular files in `dir` (not recursive) whose extension is in
	/// `extensions`, compared case-insensitively.
	pub fn scan(dir: impl AsRef<Path>, extensions: &[String]) -> Result<Self> {
		let dir = dir.as_ref();
		let wanted: Vec<String> = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();
		let mut assets = Vec::new();

		for entry in fs::read_dir(dir)? {
			let path = entry?.path();
			if !path.is_file() {
				continue;
			}
			let matches_ext = path
				.extension()
				.and_then(|e| e.to_str())
				.is_some_and(|e| wanted.contains(&e.to_ascii_lowercase()));
			if !matches_ext {
				continue;
			}
			let (Some(file_name), Some(stem)) = (
				path.file_name().and_then(|n| n.to_str()),
				path.file_stem().and_then(|n| n.to_str()),
			) else {
				debug!("assets: skipping non UTF-8 file name {}", path.display());
				continue;
			};
			assets.push(Asset {
				file_name: file_name.to_string(),
				stem: stem.to_string(),
				path: path.clone(),
			});
		}

		assets.sort_by(|a, b| a.file_name.cmp(&b.file_name));
		info!("assets: found {} images in {}", assets.len(), dir.display());
		Ok(Self {
			dir: dir.to_path_buf(),
			assets,
		})
	}

	/// Number of image files found.
	pub fn len(&self) -> usize {
		self.assets.len()
	}

	/// No image files found.
	pub fn is_empty(&self) -> bool {
		self.assets.is_empty()
	}

	/// One node per asset: id and label are the file stem, the image path is
	/// relative to `settings.public_root` when the asset lives under it.
	///
	/// When two files share a stem (`Ahri.png`, `Ahri.webp`) the first in
	/// file-name order wins.
	pub fn seed_nodes(&self, settings: &AssetSettings, fallback_image: &str) -> Result<Vec<Node>> {
		let mut seen = HashSet::new();
		let mut nodes = Vec::with_capacity(self.assets.len());
		for asset in &self.assets {
			if !seen.insert(asset.stem.as_str()) {
				warn!("assets: {} shares its id with an earlier file, skipped", asset.file_name);
				continue;
			}
			nodes.push(
				Node::builder(asset.stem.as_str(), settings.shape)
					.kind(settings.node_type.as_str())
					.image(web_path(&asset.path, &settings.public_root))
					.broken_image(fallback_image)
					.label(asset.stem.as_str())
					.build()?,
			);
		}
		Ok(nodes)
	}

	/// A graph holding [`AssetCatalog::seed_nodes`] and no edges.
	pub fn seed_graph(&self, settings: &AssetSettings, fallback_image: &str) -> Result<Graph> {
		Ok(Graph {
			nodes: self.seed_nodes(settings, fallback_image)?,
			edges: Vec::new(),
		})
	}
}

/// `path` relative to `root`, joined with `/` regardless of platform.
///
/// A path outside `root` is kept whole, including its root and drive prefix.
fn web_path(path: &Path, root: &Path) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);
	let mut out = String::new();
	for component in relative.components() {
		match component {
			Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
			Component::RootDir => out.push('/'),
			Component::CurDir => {}
			Component::ParentDir => push_segment(&mut out, ".."),
			Component::Normal(part) => push_segment(&mut out, &part.to_string_lossy()),
		}
	}
	out
}

fn push_segment(out: &mut String, segment: &str) {
	if !out.is_empty() && !out.ends_with('/') {
		out.push('/');
	}
	out.push_str(segment);
}
