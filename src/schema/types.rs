//! Node and edge records and the graph container that holds them.
//!
//! Records derive `Serialize` directly in their wire shape. Deserialization
//! goes through the permissive raw forms in [`super::codec`] so that every
//! record read from a document passes the same checks as one built in code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{Error, Result};

/// How the consumer draws a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
	/// Image cropped to a circle.
	CircularImage,
	/// Image drawn as-is.
	Image,
}

impl Shape {
	/// Wire name of the shape.
	pub const fn as_str(self) -> &'static str {
		match self {
			Shape::CircularImage => "circularImage",
			Shape::Image => "image",
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Shape {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"circularImage" => Ok(Shape::CircularImage),
			"image" => Ok(Shape::Image),
			other => Err(Error::validation(
				"shape",
				format!("unknown shape {other:?}, expected \"circularImage\" or \"image\""),
			)),
		}
	}
}

/// Edge weight. Integers stay integers on the wire (`3`, not `3.0`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Weight {
	/// Whole-number weight.
	Int(i64),
	/// Fractional weight. Always finite.
	Float(f64),
}

impl<'de> Deserialize<'de> for Weight {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let n = serde_json::Number::deserialize(deserializer)?;
		if let Some(v) = n.as_i64() {
			return Ok(Weight::Int(v));
		}
		// A whole number past i64 would silently become a lossy float.
		if n.is_u64() {
			return Err(de::Error::custom(format!(
				"integer weight {n} is outside the i64 range"
			)));
		}
		n.as_f64()
			.map(Weight::Float)
			.ok_or_else(|| de::Error::custom(format!("weight {n} is not a number")))
	}
}

impl Weight {
	/// The weight as a float, whatever its representation.
	pub fn as_f64(self) -> f64 {
		match self {
			Weight::Int(v) => v as f64,
			Weight::Float(v) => v,
		}
	}
}

impl From<i64> for Weight {
	fn from(v: i64) -> Self {
		Weight::Int(v)
	}
}

impl From<f64> for Weight {
	fn from(v: f64) -> Self {
		Weight::Float(v)
	}
}

fn is_zero(v: &f64) -> bool {
	*v == 0.0
}

fn is_false(v: &bool) -> bool {
	!*v
}

/// A graph vertex: a champion, item, team, lane, ...
///
/// Build with [`Node::builder`]; the builder enforces the field rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "crate::schema::codec::RawNode", rename_all = "camelCase")]
pub struct Node {
	/// Unique identifier. Edges refer to nodes by this id.
	pub id: String,
	/// How the consumer draws the node.
	pub shape: Shape,
	/// Free-form category tag such as `"champion"` or `"item"`.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Primary visual, an opaque path or URI.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// In `[0.0, 1.0]`.
	#[serde(skip_serializing_if = "is_zero")]
	pub opacity: f64,
	/// Shown when `image` fails to load.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub broken_image: Option<String>,
	/// Display name. The consumer falls back to the id.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Free text, may hold multi-line bulleted content.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Generic numeric payload, e.g. a size hint for the renderer.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<i64>,
}

impl Node {
	/// Start building a node. `id` and `shape` are the only required fields.
	pub fn builder(id: impl Into<String>, shape: Shape) -> NodeBuilder {
		NodeBuilder {
			node: Node {
				id: id.into(),
				shape,
				kind: None,
				image: None,
				opacity: 0.0,
				broken_image: None,
				label: None,
				description: None,
				value: None,
			},
		}
	}

	/// Image to show if `image` fails to resolve: `broken_image`, else `default`.
	/// `None` when the node has no image at all.
	pub fn fallback_image<'a>(&'a self, default: &'a str) -> Option<&'a str> {
		self.image.as_ref()?;
		Some(self.broken_image.as_deref().unwrap_or(default))
	}

	/// Label if set, otherwise the id.
	pub fn display_name(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}
}

/// Validating builder for [`Node`].
#[derive(Clone, Debug)]
#[must_use]
pub struct NodeBuilder {
	node: Node,
}

impl NodeBuilder {
	/// Category tag, written as `type`.
	pub fn kind(mut self, kind: impl Into<String>) -> Self {
		self.node.kind = Some(kind.into());
		self
	}

	/// Primary visual.
	pub fn image(mut self, image: impl Into<String>) -> Self {
		self.node.image = Some(image.into());
		self
	}

	/// Checked by [`NodeBuilder::build`].
	pub fn opacity(mut self, opacity: f64) -> Self {
		self.node.opacity = opacity;
		self
	}

	/// Fallback visual.
	pub fn broken_image(mut self, broken_image: impl Into<String>) -> Self {
		self.node.broken_image = Some(broken_image.into());
		self
	}

	/// Display name.
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.node.label = Some(label.into());
		self
	}

	/// Free text.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.node.description = Some(description.into());
		self
	}

	/// Numeric payload.
	pub fn value(mut self, value: i64) -> Self {
		self.node.value = Some(value);
		self
	}

	/// Check the field rules and produce the node.
	pub fn build(self) -> Result<Node> {
		let node = self.node;
		require_id("id", &node.id)?;
		if !node.opacity.is_finite() || !(0.0..=1.0).contains(&node.opacity) {
			return Err(Error::validation(
				"opacity",
				format!("{} is outside [0.0, 1.0]", node.opacity),
			));
		}
		Ok(node)
	}
}

/// A relationship between two nodes, referenced by id.
///
/// On the wire `source`/`target` are written as `from`/`to`, which is what
/// the visualization consumer reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "crate::schema::codec::RawEdge", rename_all = "camelCase")]
pub struct Edge {
	/// Id of the node the edge starts at, `from` on the wire.
	#[serde(rename = "from")]
	pub source: String,
	/// Id of the node the edge ends at, `to` on the wire.
	#[serde(rename = "to")]
	pub target: String,
	/// Strength of the relationship.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub weight: Option<Weight>,
	/// Text drawn along the edge.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// View tag. Untyped edges belong to the default view.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Hover text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Arrowhead at the `from` end.
	#[serde(skip_serializing_if = "is_false")]
	pub arrow_to_source: bool,
	/// Arrowhead at the `to` end.
	#[serde(skip_serializing_if = "is_false")]
	pub arrow_to_target: bool,
	/// Explicit flag. See [`Edge::is_bidirectional`] for the derived form.
	#[serde(skip_serializing_if = "is_false")]
	pub bidirectional: bool,
}

impl Edge {
	/// Start building an edge from `source` to `target`.
	pub fn builder(source: impl Into<String>, target: impl Into<String>) -> EdgeBuilder {
		EdgeBuilder {
			edge: Edge {
				source: source.into(),
				target: target.into(),
				weight: None,
				label: None,
				kind: None,
				description: None,
				arrow_to_source: false,
				arrow_to_target: false,
				bidirectional: false,
			},
		}
	}

	/// True when flagged bidirectional or when arrows point both ways.
	pub fn is_bidirectional(&self) -> bool {
		self.bidirectional || (self.arrow_to_source && self.arrow_to_target)
	}

	/// Both endpoints name the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}

	/// The edge's view tag, or `default` for untyped edges.
	pub fn kind_or<'a>(&'a self, default: &'a str) -> &'a str {
		self.kind.as_deref().unwrap_or(default)
	}

	/// Whether `id` is one of the endpoints.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// Validating builder for [`Edge`].
#[derive(Clone, Debug)]
#[must_use]
pub struct EdgeBuilder {
	edge: Edge,
}

impl EdgeBuilder {
	/// Integer or float weight.
	pub fn weight(mut self, weight: impl Into<Weight>) -> Self {
		self.edge.weight = Some(weight.into());
		self
	}

	/// Text drawn along the edge.
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.edge.label = Some(label.into());
		self
	}

	/// View tag, written as `type`.
	pub fn kind(mut self, kind: impl Into<String>) -> Self {
		self.edge.kind = Some(kind.into());
		self
	}

	/// Hover text.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.edge.description = Some(description.into());
		self
	}

	/// Arrowhead at the `from` end.
	pub fn arrow_to_source(mut self, on: bool) -> Self {
		self.edge.arrow_to_source = on;
		self
	}

	/// Arrowhead at the `to` end.
	pub fn arrow_to_target(mut self, on: bool) -> Self {
		self.edge.arrow_to_target = on;
		self
	}

	/// Explicit bidirectional flag.
	pub fn bidirectional(mut self, on: bool) -> Self {
		self.edge.bidirectional = on;
		self
	}

	/// Check the field rules and produce the edge.
	pub fn build(self) -> Result<Edge> {
		let edge = self.edge;
		require_id("from", &edge.source)?;
		require_id("to", &edge.target)?;
		if let Some(Weight::Float(w)) = edge.weight {
			if !w.is_finite() {
				return Err(Error::validation("weight", format!("{w} is not a finite number")));
			}
		}
		Ok(edge)
	}
}

fn require_id(field: &'static str, id: &str) -> Result<()> {
	if id.trim().is_empty() {
		return Err(Error::validation(field, "must not be empty"));
	}
	Ok(())
}

/// Nodes and edges in insertion order.
///
/// Order only affects drawing order in the consumer. A graph read from a
/// document is not trusted until [`Graph::validate`] succeeds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	/// Vertices. Ids should be unique.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Relationships between `nodes`, by id.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl Graph {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a node. Uniqueness is checked by [`Graph::validate`], not here.
	pub fn push_node(&mut self, node: Node) -> &mut Self {
		self.nodes.push(node);
		self
	}

	/// Append an edge. Endpoints are checked by [`Graph::validate`], not here.
	pub fn push_edge(&mut self, edge: Edge) -> &mut Self {
		self.edges.push(edge);
		self
	}

	/// First node with the given id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Run the graph-level checks. See [`super::validate_graph`].
	pub fn validate(&self) -> Result<()> {
		super::validate::validate_graph(&self.nodes, &self.edges)
	}

	/// Non-fatal findings. See [`super::lint_graph`].
	pub fn lint(&self) -> Vec<super::validate::Warning> {
		super::validate::lint_graph(&self.nodes, &self.edges)
	}

	/// Distinct edge view tags in first-seen order, untyped edges counted as `default`.
	pub fn edge_kinds<'a>(&'a self, default: &'a str) -> Vec<&'a str> {
		let mut kinds: Vec<&str> = Vec::new();
		for edge in &self.edges {
			let kind = edge.kind_or(default);
			if !kinds.contains(&kind) {
				kinds.push(kind);
			}
		}
		kinds
	}

	/// Edge count per view tag, in the order of [`Graph::edge_kinds`].
	pub fn edge_kind_counts<'a>(&'a self, default: &'a str) -> Vec<(&'a str, usize)> {
		let mut counts: Vec<(&str, usize)> = Vec::new();
		for edge in &self.edges {
			let kind = edge.kind_or(default);
			match counts.iter_mut().find(|(k, _)| *k == kind) {
				Some((_, count)) => *count += 1,
				None => counts.push((kind, 1)),
			}
		}
		counts
	}

	/// No nodes and no edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_id_is_rejected() {
		let err = Node::builder("", Shape::Image).build().unwrap_err();
		assert!(matches!(err, Error::Validation { field: "id", .. }));

		let err = Node::builder("   ", Shape::Image).build().unwrap_err();
		assert!(matches!(err, Error::Validation { field: "id", .. }));
	}

	#[test]
	fn unknown_shape_is_rejected() {
		let err = "triangle".parse::<Shape>().unwrap_err();
		assert!(matches!(err, Error::Validation { field: "shape", .. }));
		assert_eq!("circularImage".parse::<Shape>().unwrap(), Shape::CircularImage);
		assert_eq!("image".parse::<Shape>().unwrap(), Shape::Image);
	}

	#[test]
	fn opacity_must_be_in_unit_range() {
		assert!(Node::builder("a", Shape::Image).opacity(1.0).build().is_ok());
		for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
			let err = Node::builder("a", Shape::Image).opacity(bad).build().unwrap_err();
			assert!(matches!(err, Error::Validation { field: "opacity", .. }), "{bad}");
		}
	}

	#[test]
	fn node_defaults() {
		let node = Node::builder("Aatrox", Shape::CircularImage).build().unwrap();
		assert_eq!(node.opacity, 0.0);
		assert!(node.kind.is_none());
		assert!(node.value.is_none());
		assert_eq!(node.display_name(), "Aatrox");
	}

	#[test]
	fn fallback_image_only_applies_to_nodes_with_images() {
		let plain = Node::builder("a", Shape::Image).build().unwrap();
		assert_eq!(plain.fallback_image("lol.png"), None);

		let with_image = Node::builder("b", Shape::Image).image("b.webp").build().unwrap();
		assert_eq!(with_image.fallback_image("lol.png"), Some("lol.png"));

		let explicit = Node::builder("c", Shape::Image)
			.image("c.webp")
			.broken_image("c-fallback.webp")
			.build()
			.unwrap();
		assert_eq!(explicit.fallback_image("lol.png"), Some("c-fallback.webp"));
	}

	#[test]
	fn edge_endpoints_are_required() {
		let err = Edge::builder("", "4").build().unwrap_err();
		assert!(matches!(err, Error::Validation { field: "from", .. }));
		let err = Edge::builder("1", "").build().unwrap_err();
		assert!(matches!(err, Error::Validation { field: "to", .. }));
	}

	#[test]
	fn non_finite_weight_is_rejected() {
		let err = Edge::builder("1", "2").weight(f64::NAN).build().unwrap_err();
		assert!(matches!(err, Error::Validation { field: "weight", .. }));
	}

	#[test]
	fn bidirectional_is_derived_from_arrows_or_set_directly() {
		let one_way = Edge::builder("1", "2").arrow_to_target(true).build().unwrap();
		assert!(!one_way.is_bidirectional());

		let both = Edge::builder("1", "2")
			.arrow_to_source(true)
			.arrow_to_target(true)
			.build()
			.unwrap();
		assert!(both.is_bidirectional());
		assert!(!both.bidirectional);

		let flagged = Edge::builder("1", "2").bidirectional(true).build().unwrap();
		assert!(flagged.is_bidirectional());
	}

	#[test]
	fn edge_kinds_keep_first_seen_order() {
		let mut graph = Graph::new();
		graph
			.push_edge(Edge::builder("a", "b").kind("relItems").build().unwrap())
			.push_edge(Edge::builder("a", "c").build().unwrap())
			.push_edge(Edge::builder("b", "c").kind("relItems").build().unwrap());
		assert_eq!(graph.edge_kinds("relMain"), vec!["relItems", "relMain"]);
	}

	#[test]
	fn edge_kind_counts_follow_first_seen_order() {
		let mut graph = Graph::new();
		graph
			.push_edge(Edge::builder("a", "b").kind("relItems").build().unwrap())
			.push_edge(Edge::builder("a", "c").build().unwrap())
			.push_edge(Edge::builder("b", "c").kind("relItems").build().unwrap())
			.push_edge(Edge::builder("c", "a").kind("relMain").build().unwrap());
		assert_eq!(
			graph.edge_kind_counts("relMain"),
			vec![("relItems", 2), ("relMain", 2)]
		);
		assert!(Graph::new().edge_kind_counts("relMain").is_empty());
	}
}
