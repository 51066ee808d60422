//! Graph data structures for input to the network graph component.

use serde::Deserialize;

/// A node in the input graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Links reference nodes by id.
	pub id: String,
	/// Numeric weight. Drives display radius and draw order.
	#[serde(default)]
	pub value: f64,
	/// Discrete category label driving node color.
	#[serde(default)]
	pub categories: String,
	/// Optional short display label.
	#[serde(default)]
	pub label: Option<String>,
	/// Optional long title, preferred over `label` when rendering.
	#[serde(default)]
	pub title: Option<String>,
	/// Optional reference to an external drawable asset. The core only
	/// forwards this; loading and drawing is the render bridge's business.
	#[serde(default)]
	pub image: Option<String>,
}

impl GraphNode {
	/// Display radius derived from the node weight, bounded so tiny and huge
	/// values stay clickable and on-screen.
	pub fn radius(&self) -> f64 {
		(self.value / 2.0).clamp(14.0, 60.0)
	}

	/// Text shown next to the node: `title` wins over `label`.
	pub fn display_text(&self) -> Option<&str> {
		self.title.as_deref().or(self.label.as_deref())
	}
}

/// A directed link between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Numeric weight affecting visual thickness only.
	#[serde(default = "default_link_value")]
	pub value: f64,
}

fn default_link_value() -> f64 {
	1.0
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_minimal_node() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes": [{"id": "a"}], "links": []}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].id, "a");
		assert!(data.nodes[0].label.is_none());
		assert!(data.nodes[0].image.is_none());
	}

	#[test]
	fn link_value_defaults_to_one() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes": [], "links": [{"source": "a", "target": "b"}]}"#,
		)
		.unwrap();
		assert_eq!(data.links[0].value, 1.0);
	}

	#[test]
	fn radius_is_clamped() {
		let small = GraphNode {
			id: "s".into(),
			value: 1.0,
			categories: String::new(),
			label: None,
			title: None,
			image: None,
		};
		let large = GraphNode { value: 500.0, ..small.clone() };
		assert_eq!(small.radius(), 14.0);
		assert_eq!(large.radius(), 60.0);
	}

	#[test]
	fn title_preferred_over_label() {
		let node = GraphNode {
			id: "n".into(),
			value: 0.0,
			categories: String::new(),
			label: Some("short".into()),
			title: Some("long".into()),
			image: None,
		};
		assert_eq!(node.display_text(), Some("long"));
	}
}
