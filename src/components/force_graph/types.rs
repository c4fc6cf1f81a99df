//! Canonical graph data model and the wire-format adapter.

use serde::Deserialize;

/// Node ids that belong to every domain view (shared entry/exit of the dialogue).
pub const GLOBAL_NODE_IDS: [&str; 4] = ["start", "end", "greeting", "goodbye"];

/// Whether a node represents a dialogue state or a system action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	State,
	Action,
}

impl NodeKind {
	/// Fill color used when a node carries no explicit color.
	pub fn default_color(self) -> &'static str {
		match self {
			NodeKind::State => "lightblue",
			NodeKind::Action => "lightgray",
		}
	}
}

/// A dialogue state or action vertex. Identity is the `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub domain: Option<String>,
	pub color: Option<String>,
}

/// A directed, optionally weighted transition between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

/// The unit exchanged with the API and the fallback generator. Immutable once
/// rendered; layout positions live in the layout engine, never here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphSnapshot {
	/// Restricts the snapshot to one domain, mirroring the API's per-domain
	/// endpoint: nodes of that domain plus the shared start/end/greeting/goodbye
	/// survive, and only links with both endpoints still present are kept.
	pub fn filter_domain(&self, domain: &str) -> GraphSnapshot {
		let nodes: Vec<GraphNode> = self
			.nodes
			.iter()
			.filter(|n| {
				n.domain.as_deref() == Some(domain) || GLOBAL_NODE_IDS.contains(&n.id.as_str())
			})
			.cloned()
			.collect();
		let kept: std::collections::HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let links = self
			.links
			.iter()
			.filter(|l| kept.contains(l.source.as_str()) && kept.contains(l.target.as_str()))
			.cloned()
			.collect();
		GraphSnapshot { nodes, links }
	}
}

/// A link endpoint on the wire: either a bare id or an embedded node object.
/// Some producers resolve endpoints in place, so both shapes must parse.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RawEndpoint {
	Id(String),
	Node { id: String },
}

impl RawEndpoint {
	fn into_id(self) -> String {
		match self {
			RawEndpoint::Id(id) | RawEndpoint::Node { id } => id,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
	id: String,
	#[serde(default)]
	label: Option<String>,
	#[serde(rename = "type")]
	kind: NodeKind,
	#[serde(default)]
	domain: Option<String>,
	#[serde(default)]
	color: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawLink {
	source: RawEndpoint,
	target: RawEndpoint,
	#[serde(default)]
	weight: Option<f64>,
}

/// The snapshot as received from the API. Missing `nodes`/`links` arrays
/// deserialize as empty, so a malformed-but-parseable body renders nothing
/// rather than failing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSnapshot {
	#[serde(default)]
	nodes: Vec<RawNode>,
	#[serde(default)]
	links: Vec<RawLink>,
}

impl RawSnapshot {
	/// Reduces every link endpoint to a plain id and fills defaulted fields.
	/// Idempotent: canonical input comes back unchanged. Dangling endpoints are
	/// passed through; the layout engine drops those links at insertion.
	pub fn canonicalize(self) -> GraphSnapshot {
		let nodes = self
			.nodes
			.into_iter()
			.map(|n| GraphNode {
				label: n.label.unwrap_or_else(|| n.id.clone()),
				id: n.id,
				kind: n.kind,
				domain: n.domain,
				color: n.color,
			})
			.collect();
		let links = self
			.links
			.into_iter()
			.map(|l| GraphLink {
				source: l.source.into_id(),
				target: l.target.into_id(),
				weight: l.weight.unwrap_or(1.0),
			})
			.collect();
		GraphSnapshot { nodes, links }
	}
}
