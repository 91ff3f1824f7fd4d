//! Error type shared by the schema, the asset catalog and the CLI.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, checking or moving graph records.
#[derive(Error, Debug)]
pub enum Error {
	/// A record field is missing or holds a value the schema does not accept.
	#[error("invalid {field}: {reason}")]
	Validation {
		/// Name of the offending field, as it appears on the wire.
		field: &'static str,
		/// Human-readable explanation.
		reason: String,
	},

	/// Two nodes in the same collection share an id.
	#[error("duplicate node id {id:?}")]
	DuplicateId {
		/// The repeated id.
		id: String,
	},

	/// An edge names a node that is not in the graph.
	#[error("edge #{edge_index} ({from:?} -> {to:?}) references unknown node {missing:?}")]
	DanglingReference {
		/// The id that could not be resolved.
		missing: String,
		/// Position of the edge in the edge list.
		edge_index: usize,
		/// Source id of the offending edge.
		from: String,
		/// Target id of the offending edge.
		to: String,
	},

	/// Serialized input could not be turned into a graph.
	#[error("malformed graph document: {0}")]
	Parse(String),

	/// A graph could not be written out.
	#[error("failed to serialize graph: {0}")]
	Serialize(#[source] serde_json::Error),

	/// Configuration could not be loaded or holds unusable values.
	#[error("configuration error: {0}")]
	Config(String),

	/// Filesystem errors from asset scans and CLI file access.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Create a validation error for `field`.
	pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
		Self::Validation {
			field,
			reason: reason.into(),
		}
	}

	/// Create a configuration error.
	pub fn config(msg: impl Into<String>) -> Self {
		Self::Config(msg.into())
	}

	/// True for errors raised by graph-level checks rather than by single records.
	pub fn is_integrity_error(&self) -> bool {
		matches!(
			self,
			Error::DuplicateId { .. } | Error::DanglingReference { .. }
		)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}
