//! Node/edge record schema for entity relationship graphs.
//!
//! Provides:
//! - Typed [`Node`] and [`Edge`] records with validating builders
//! - The [`Graph`] container and its integrity checks
//! - The canonical JSON wire form read by the visualization
//! - Edge-type views with per-node degree statistics
//!
//! # Example
//!
//! ```
//! use champ_graph::schema::{self, Edge, Graph, Node, Shape};
//!
//! let mut graph = Graph::new();
//! graph
//!     .push_node(Node::builder("1", Shape::CircularImage).label("Alice").build()?)
//!     .push_node(Node::builder("4", Shape::Image).label("Bob").build()?)
//!     .push_edge(Edge::builder("1", "4").weight(3).label("Works at").build()?);
//! graph.validate()?;
//!
//! let text = schema::serialize(&graph)?;
//! assert!(text.contains(r#""from":"1","to":"4""#));
//! assert_eq!(schema::deserialize(&text)?, graph);
//! # Ok::<(), champ_graph::Error>(())
//! ```

pub(crate) mod codec;
mod types;
mod validate;
pub mod view;

pub use codec::{deserialize, serialize, serialize_pretty};
pub use types::{Edge, EdgeBuilder, Graph, Node, NodeBuilder, Shape, Weight};
pub use validate::{Warning, lint_graph, validate_graph};
pub use view::{EdgeFilter, GraphView, ViewStats};
