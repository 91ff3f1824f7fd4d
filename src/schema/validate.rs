//! Graph-level integrity checks.

use std::collections::HashSet;
use std::fmt;

use log::debug;

use super::types::{Edge, Node};
use crate::error::{Error, Result};

/// A finding that does not make the graph invalid but is probably a mistake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
	/// Edge whose source and target are the same node.
	SelfLoop {
		/// Position of the edge in the graph's edge list.
		edge_index: usize,
		/// The node the edge loops on.
		id: String,
	},
	/// Node that no edge touches. Typed views never show it.
	Isolated {
		/// The untouched node.
		id: String,
	},
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Warning::SelfLoop { edge_index, id } => {
				write!(f, "edge #{edge_index} is a self-loop on {id:?}")
			}
			Warning::Isolated { id } => write!(f, "node {id:?} has no edges"),
		}
	}
}

/// Check id uniqueness, then edge endpoints.
///
/// Stops at the first problem: a repeated id is reported before any
/// dangling edge, and within an edge the source is checked before the target.
/// Warnings are not checked here; callers that report them use [`lint_graph`].
pub fn validate_graph(nodes: &[Node], edges: &[Edge]) -> Result<()> {
	let mut ids: HashSet<&str> = HashSet::with_capacity(nodes.len());
	for node in nodes {
		if !ids.insert(node.id.as_str()) {
			return Err(Error::DuplicateId { id: node.id.clone() });
		}
	}

	for (edge_index, edge) in edges.iter().enumerate() {
		for endpoint in [&edge.source, &edge.target] {
			if !ids.contains(endpoint.as_str()) {
				return Err(Error::DanglingReference {
					missing: endpoint.clone(),
					edge_index,
					from: edge.source.clone(),
					to: edge.target.clone(),
				});
			}
		}
	}

	debug!("graph valid: {} nodes, {} edges", nodes.len(), edges.len());
	Ok(())
}

/// Non-fatal findings: self-loops in edge order, then isolated nodes in node order.
pub fn lint_graph(nodes: &[Node], edges: &[Edge]) -> Vec<Warning> {
	let mut warnings: Vec<Warning> = edges
		.iter()
		.enumerate()
		.filter(|(_, edge)| edge.is_self_loop())
		.map(|(edge_index, edge)| Warning::SelfLoop {
			edge_index,
			id: edge.source.clone(),
		})
		.collect();

	let touched: HashSet<&str> = edges
		.iter()
		.flat_map(|edge| [edge.source.as_str(), edge.target.as_str()])
		.collect();
	warnings.extend(
		nodes
			.iter()
			.filter(|node| !touched.contains(node.id.as_str()))
			.map(|node| Warning::Isolated { id: node.id.clone() }),
	);
	warnings
}
