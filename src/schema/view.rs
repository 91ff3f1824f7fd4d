//! Edge-type views over a graph.
//!
//! The viewer shows one edge type at a time (`relMain`, `relItems`, ...) and
//! hides nodes that no shown edge touches. These helpers compute what such a
//! view contains without drawing anything.

use std::collections::HashMap;
use std::str::FromStr;

use super::types::{Edge, Graph, Node};
use crate::error::Result;

/// Which edges a view shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeFilter {
	/// Every edge, and every node including isolated ones.
	All,
	/// Edges whose type equals this tag.
	Kind(String),
}

impl EdgeFilter {
	/// Untyped edges count as `default_kind`.
	pub fn matches(&self, edge: &Edge, default_kind: &str) -> bool {
		match self {
			EdgeFilter::All => true,
			EdgeFilter::Kind(kind) => edge.kind_or(default_kind) == kind.as_str(),
		}
	}
}

impl FromStr for EdgeFilter {
	type Err = crate::error::Error;

	/// `"all"` selects everything; anything else is an edge type.
	fn from_str(s: &str) -> Result<Self> {
		match s {
			"all" => Ok(EdgeFilter::All),
			"" => Err(crate::error::Error::validation("type", "view name must not be empty")),
			kind => Ok(EdgeFilter::Kind(kind.to_string())),
		}
	}
}

/// Summary numbers for a view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewStats {
	/// Visible nodes.
	pub nodes: usize,
	/// Visible edges.
	pub edges: usize,
	/// Highest degree among visible nodes, 0 for an empty view.
	pub max_degree: usize,
	/// Mean degree over the visible nodes, 0.0 for an empty view.
	pub avg_degree: f64,
}

/// The nodes and edges one filter makes visible, in graph order.
#[derive(Clone, Debug)]
pub struct GraphView<'a> {
	/// Nodes the view shows.
	pub nodes: Vec<&'a Node>,
	/// Edges the filter matches.
	pub edges: Vec<&'a Edge>,
}

impl<'a> GraphView<'a> {
	/// Apply `filter` to `graph`. Untyped edges count as `default_kind`.
	pub fn new(graph: &'a Graph, filter: &EdgeFilter, default_kind: &str) -> Self {
		let edges: Vec<&Edge> = graph
			.edges
			.iter()
			.filter(|edge| filter.matches(edge, default_kind))
			.collect();

		let nodes = match filter {
			EdgeFilter::All => graph.nodes.iter().collect(),
			EdgeFilter::Kind(_) => graph
				.nodes
				.iter()
				.filter(|node| edges.iter().any(|edge| edge.touches(&node.id)))
				.collect(),
		};

		Self { nodes, edges }
	}

	/// Visible-edge endpoint count per visible node. A self-loop counts twice.
	pub fn degrees(&self) -> HashMap<&'a str, usize> {
		let mut degrees: HashMap<&str, usize> =
			self.nodes.iter().map(|node| (node.id.as_str(), 0)).collect();
		for edge in &self.edges {
			for endpoint in [edge.source.as_str(), edge.target.as_str()] {
				if let Some(count) = degrees.get_mut(endpoint) {
					*count += 1;
				}
			}
		}
		degrees
	}

	/// Counts and degree summary.
	pub fn stats(&self) -> ViewStats {
		let degrees = self.degrees();
		let max_degree = degrees.values().copied().max().unwrap_or(0);
		let avg_degree = if degrees.is_empty() {
			0.0
		} else {
			degrees.values().sum::<usize>() as f64 / degrees.len() as f64
		};
		ViewStats {
			nodes: self.nodes.len(),
			edges: self.edges.len(),
			max_degree,
			avg_degree,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::Shape;

	fn fixture() -> Graph {
		let mut graph = Graph::new();
		for id in ["Aatrox", "Ahri", "top", "Doran's Blade", "lonely"] {
			graph.push_node(Node::builder(id, Shape::CircularImage).build().unwrap());
		}
		graph
			.push_edge(Edge::builder("Aatrox", "top").build().unwrap())
			.push_edge(Edge::builder("Ahri", "Aatrox").kind("relMain").build().unwrap())
			.push_edge(
				Edge::builder("Aatrox", "Doran's Blade")
					.kind("relItems")
					.build()
					.unwrap(),
			);
		graph
	}

	#[test]
	fn untyped_edges_fall_into_the_default_view() {
		let graph = fixture();
		let view = GraphView::new(&graph, &EdgeFilter::Kind("relMain".into()), "relMain");
		assert_eq!(view.edges.len(), 2);
		let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["Aatrox", "Ahri", "top"]);
	}

	#[test]
	fn typed_view_hides_untouched_nodes() {
		let graph = fixture();
		let view = GraphView::new(&graph, &EdgeFilter::Kind("relItems".into()), "relMain");
		let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["Aatrox", "Doran's Blade"]);
	}

	#[test]
	fn all_view_keeps_isolated_nodes() {
		let graph = fixture();
		let view = GraphView::new(&graph, &EdgeFilter::All, "relMain");
		assert_eq!(view.nodes.len(), 5);
		assert_eq!(view.edges.len(), 3);
		assert_eq!(view.degrees()["lonely"], 0);
	}

	#[test]
	fn degree_stats() {
		let graph = fixture();
		let view = GraphView::new(&graph, &EdgeFilter::All, "relMain");
		let degrees = view.degrees();
		assert_eq!(degrees["Aatrox"], 3);
		assert_eq!(degrees["top"], 1);

		let stats = view.stats();
		assert_eq!(stats.max_degree, 3);
		assert_eq!(stats.nodes, 5);
		assert!((stats.avg_degree - 6.0 / 5.0).abs() < 1e-9);
	}

	#[test]
	fn self_loop_counts_twice() {
		let mut graph = Graph::new();
		graph
			.push_node(Node::builder("a", Shape::Image).build().unwrap())
			.push_edge(Edge::builder("a", "a").build().unwrap());
		let view = GraphView::new(&graph, &EdgeFilter::All, "relMain");
		assert_eq!(view.degrees()["a"], 2);
	}

	#[test]
	fn empty_view_stats() {
		let graph = fixture();
		let view = GraphView::new(&graph, &EdgeFilter::Kind("relTeams".into()), "relMain");
		assert_eq!(
			view.stats(),
			ViewStats {
				nodes: 0,
				edges: 0,
				max_degree: 0,
				avg_degree: 0.0
			}
		);
	}

	#[test]
	fn parses_filters() {
		assert_eq!("all".parse::<EdgeFilter>().unwrap(), EdgeFilter::All);
		assert_eq!(
			"relItems".parse::<EdgeFilter>().unwrap(),
			EdgeFilter::Kind("relItems".into())
		);
		assert!("".parse::<EdgeFilter>().is_err());
	}
}
