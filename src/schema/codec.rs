//! Canonical JSON form of a [`Graph`].
//!
//! Writing is plain `serde_json` over the record types. Reading goes through
//! the raw structs below, which accept what existing documents contain (ids
//! written as numbers, `null` for absent fields, extra viewer-specific keys)
//! and then run the record builders.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Edge, Graph, Node, Shape, Weight};
use crate::error::{Error, Result};

/// Node as it may appear in a document, before field checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNode {
	#[serde(deserialize_with = "text_or_number")]
	id: String,
	shape: String,
	#[serde(rename = "type")]
	kind: Option<String>,
	image: Option<String>,
	opacity: Option<f64>,
	broken_image: Option<String>,
	label: Option<String>,
	description: Option<String>,
	value: Option<i64>,
}

impl TryFrom<RawNode> for Node {
	type Error = Error;

	fn try_from(raw: RawNode) -> Result<Node> {
		let shape: Shape = raw.shape.parse()?;
		let mut builder = Node::builder(raw.id, shape).opacity(raw.opacity.unwrap_or(0.0));
		if let Some(kind) = raw.kind {
			builder = builder.kind(kind);
		}
		if let Some(image) = raw.image {
			builder = builder.image(image);
		}
		if let Some(broken_image) = raw.broken_image {
			builder = builder.broken_image(broken_image);
		}
		if let Some(label) = raw.label {
			builder = builder.label(label);
		}
		if let Some(description) = raw.description {
			builder = builder.description(description);
		}
		if let Some(value) = raw.value {
			builder = builder.value(value);
		}
		builder.build()
	}
}

/// Edge as it may appear in a document, before field checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEdge {
	#[serde(deserialize_with = "text_or_number")]
	from: String,
	#[serde(deserialize_with = "text_or_number")]
	to: String,
	weight: Option<Weight>,
	label: Option<String>,
	#[serde(rename = "type")]
	kind: Option<String>,
	description: Option<String>,
	arrow_to_source: Option<bool>,
	arrow_to_target: Option<bool>,
	bidirectional: Option<bool>,
}

impl TryFrom<RawEdge> for Edge {
	type Error = Error;

	fn try_from(raw: RawEdge) -> Result<Edge> {
		let mut builder = Edge::builder(raw.from, raw.to)
			.arrow_to_source(raw.arrow_to_source.unwrap_or(false))
			.arrow_to_target(raw.arrow_to_target.unwrap_or(false))
			.bidirectional(raw.bidirectional.unwrap_or(false));
		if let Some(weight) = raw.weight {
			builder = builder.weight(weight);
		}
		if let Some(label) = raw.label {
			builder = builder.label(label);
		}
		if let Some(kind) = raw.kind {
			builder = builder.kind(kind);
		}
		if let Some(description) = raw.description {
			builder = builder.description(description);
		}
		builder.build()
	}
}

/// Ids are strings, but hand-written documents use bare numbers too (`"id": 1`).
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		other => Err(serde::de::Error::custom(format!(
			"expected a string or number id, found {other}"
		))),
	}
}

/// Compact canonical JSON. Field and element order are fixed, so equal
/// graphs always produce identical text.
pub fn serialize(graph: &Graph) -> Result<String> {
	serde_json::to_string(graph).map_err(Error::Serialize)
}

/// Indented canonical JSON, for files meant to be read by people.
pub fn serialize_pretty(graph: &Graph) -> Result<String> {
	serde_json::to_string_pretty(graph).map_err(Error::Serialize)
}

/// Parse a graph document.
///
/// Every record passes its builder's field checks. Id uniqueness and edge
/// endpoints are NOT checked; call [`Graph::validate`] before trusting the result.
pub fn deserialize(text: &str) -> Result<Graph> {
	let graph: Graph = serde_json::from_str(text)?;
	log::debug!(
		"parsed graph document: {} nodes, {} edges",
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Graph {
		let mut graph = Graph::new();
		graph
			.push_node(
				Node::builder("1", Shape::CircularImage)
					.label("Alice")
					.build()
					.unwrap(),
			)
			.push_node(Node::builder("4", Shape::Image).label("Bob").build().unwrap())
			.push_edge(
				Edge::builder("1", "4")
					.weight(3)
					.label("Works at")
					.build()
					.unwrap(),
			);
		graph
	}

	#[test]
	fn serializes_in_wire_shape() {
		let text = serialize(&sample()).unwrap();
		assert_eq!(
			text,
			r#"{"nodes":[{"id":"1","shape":"circularImage","label":"Alice"},{"id":"4","shape":"image","label":"Bob"}],"edges":[{"from":"1","to":"4","weight":3,"label":"Works at"}]}"#
		);
	}

	#[test]
	fn serialization_is_deterministic() {
		let graph = sample();
		assert_eq!(serialize(&graph).unwrap(), serialize(&graph).unwrap());
	}

	#[test]
	fn round_trips_full_records() {
		let mut graph = Graph::new();
		graph
			.push_node(
				Node::builder("Aatrox", Shape::CircularImage)
					.kind("champion")
					.image("assets/champions/Aatrox.webp")
					.opacity(0.75)
					.broken_image("assets/other/lol.png")
					.label("Aatrox")
					.description("Darkin blade.\n• Top lane\n• Fighter")
					.value(20)
					.build()
					.unwrap(),
			)
			.push_node(Node::builder("top", Shape::Image).kind("lane").build().unwrap())
			.push_edge(
				Edge::builder("Aatrox", "top")
					.weight(0.5)
					.kind("relItems")
					.description("plays")
					.arrow_to_source(true)
					.arrow_to_target(true)
					.bidirectional(true)
					.build()
					.unwrap(),
			);

		let back = deserialize(&serialize_pretty(&graph).unwrap()).unwrap();
		assert_eq!(back, graph);
	}

	#[test]
	fn accepts_numeric_ids_and_nulls() {
		let text = r##"{
			"nodes": [
				{"id": 1, "shape": "circularImage", "image": "", "brokenImage": "champions/Aatrox.webp", "label": "Alice Johnson", "description": null},
				{"id": "4", "shape": "image", "size": 30, "brColor": "#C79B3B"}
			],
			"edges": [
				{"from": 1, "to": "4", "weight": 3, "label": "Works at", "width": 2}
			]
		}"##;
		let graph = deserialize(text).unwrap();
		assert_eq!(graph.nodes[0].id, "1");
		assert_eq!(graph.nodes[0].image.as_deref(), Some(""));
		assert!(graph.nodes[0].description.is_none());
		assert_eq!(graph.edges[0].source, "1");
		assert_eq!(graph.edges[0].target, "4");
		assert_eq!(graph.edges[0].weight, Some(Weight::Int(3)));
		graph.validate().unwrap();
	}

	#[test]
	fn missing_collections_are_empty() {
		let graph = deserialize(r#"{"nodes":[{"id":"a","shape":"image"}]}"#).unwrap();
		assert_eq!(graph.nodes.len(), 1);
		assert!(graph.edges.is_empty());
		assert!(deserialize("{}").unwrap().is_empty());
	}

	#[test]
	fn malformed_input_is_a_parse_error() {
		for text in [
			"",
			"{",
			r#""nodes""#,
			r#"{"nodes":[{"id":"a"}]}"#,
			r#"{"nodes":[{"id":"a","shape":"triangle"}]}"#,
			r#"{"nodes":[{"id":"","shape":"image"}]}"#,
			r#"{"nodes":[{"id":"a","shape":"image","opacity":2.0}]}"#,
			r#"{"nodes":[{"id":true,"shape":"image"}]}"#,
			r#"{"edges":[{"from":"a"}]}"#,
			r#"{"edges":[{"from":"a","to":"b","weight":"heavy"}]}"#,
		] {
			let err = deserialize(text).unwrap_err();
			assert!(matches!(err, Error::Parse(_)), "{text}: {err}");
		}
	}

	#[test]
	fn integer_weight_beyond_i64_is_rejected() {
		let err = deserialize(r#"{"edges":[{"from":"a","to":"b","weight":18446744073709551615}]}"#)
			.unwrap_err();
		assert!(matches!(err, Error::Parse(_)), "{err}");
		assert!(err.to_string().contains("outside the i64 range"), "{err}");

		let graph = deserialize(r#"{"edges":[{"from":"a","to":"b","weight":-9223372036854775808}]}"#)
			.unwrap();
		assert_eq!(graph.edges[0].weight, Some(Weight::Int(i64::MIN)));
	}

	#[test]
	fn unknown_shape_message_survives_parsing() {
		let err = deserialize(r#"{"nodes":[{"id":"a","shape":"triangle"}]}"#).unwrap_err();
		assert!(err.to_string().contains("triangle"), "{err}");
	}

	#[test]
	fn deserialize_does_not_check_references() {
		let graph = deserialize(r#"{"edges":[{"from":"1","to":"99"}]}"#).unwrap();
		assert_eq!(graph.edges.len(), 1);
		assert!(graph.validate().is_err());
	}
}
