use serde::Deserialize;

/// One contributor: `val` is their commit count and drives node size.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub val: f64,
}

/// Collaboration edge between two contributors; `value` is its strength.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub value: f64,
}

/// The contributor network as returned by the analysis service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
