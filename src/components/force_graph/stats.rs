//! Aggregate counts derived from a canonical snapshot.

use std::collections::{BTreeMap, HashMap};

use super::types::{GraphSnapshot, NodeKind};

/// Read-only summary of a snapshot, recomputed whenever new data is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStats {
	pub total_nodes: usize,
	pub total_links: usize,
	pub state_count: usize,
	pub action_count: usize,
	/// Node count per domain, for nodes that carry one.
	pub domain_counts: BTreeMap<String, usize>,
	/// Highest-degree node id and its undirected degree. Ties resolve to the
	/// node first reaching the maximum in link-iteration order.
	pub most_connected: Option<(String, usize)>,
}

impl GraphStats {
	/// Pure computation over the snapshot; deterministic for canonical input.
	pub fn compute(snapshot: &GraphSnapshot) -> Self {
		let state_count = snapshot
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::State)
			.count();

		let mut domain_counts = BTreeMap::new();
		for node in &snapshot.nodes {
			if let Some(domain) = &node.domain {
				*domain_counts.entry(domain.clone()).or_insert(0) += 1;
			}
		}

		// Undirected degree: both endpoints of every link count. First-seen
		// order is tracked separately so the max pick is stable.
		let mut degrees: HashMap<&str, usize> = HashMap::new();
		let mut seen_order: Vec<&str> = Vec::new();
		for link in &snapshot.links {
			for id in [link.source.as_str(), link.target.as_str()] {
				let entry = degrees.entry(id).or_insert(0);
				if *entry == 0 {
					seen_order.push(id);
				}
				*entry += 1;
			}
		}
		let mut most_connected: Option<(String, usize)> = None;
		for id in seen_order {
			let degree = degrees[id];
			if most_connected.as_ref().is_none_or(|(_, best)| degree > *best) {
				most_connected = Some((id.to_string(), degree));
			}
		}

		GraphStats {
			total_nodes: snapshot.nodes.len(),
			total_links: snapshot.links.len(),
			state_count,
			action_count: snapshot.nodes.len() - state_count,
			domain_counts,
			most_connected,
		}
	}

	/// Undirected degree of one node, as shown in the hover tooltip.
	pub fn degree_of(snapshot: &GraphSnapshot, id: &str) -> usize {
		snapshot
			.links
			.iter()
			.filter(|l| l.source == id || l.target == id)
			.count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode, RawSnapshot};

	fn two_node_snapshot() -> GraphSnapshot {
		serde_json::from_str::<RawSnapshot>(
			r#"{
				"nodes": [
					{"id": "a", "type": "state"},
					{"id": "b", "type": "action"}
				],
				"links": [{"source": "a", "target": "b", "weight": 4}]
			}"#,
		)
		.unwrap()
		.canonicalize()
	}

	#[test]
	fn totals_match_lengths() {
		let snapshot = two_node_snapshot();
		let stats = GraphStats::compute(&snapshot);
		assert_eq!(stats.total_nodes, 2);
		assert_eq!(stats.total_links, 1);
		assert_eq!(stats.state_count, 1);
		assert_eq!(stats.action_count, 1);
	}

	#[test]
	fn tie_resolves_to_first_seen_endpoint() {
		let stats = GraphStats::compute(&two_node_snapshot());
		// Both endpoints have degree 1; "a" appears first in link order.
		assert_eq!(stats.most_connected, Some(("a".into(), 1)));
	}

	#[test]
	fn degree_sum_is_twice_link_count() {
		let snapshot = crate::components::force_graph::fallback::sample_snapshot();
		let stats = GraphStats::compute(&snapshot);
		let degree_sum: usize = snapshot
			.nodes
			.iter()
			.map(|n| GraphStats::degree_of(&snapshot, &n.id))
			.sum();
		assert_eq!(degree_sum, 2 * stats.total_links);
	}

	#[test]
	fn domain_histogram_counts_only_tagged_nodes() {
		let snapshot = GraphSnapshot {
			nodes: vec![
				GraphNode {
					id: "start".into(),
					label: "Start".into(),
					kind: NodeKind::State,
					domain: None,
					color: None,
				},
				GraphNode {
					id: "hotel_active".into(),
					label: "hotel Active".into(),
					kind: NodeKind::State,
					domain: Some("hotel".into()),
					color: None,
				},
				GraphNode {
					id: "hotel-book".into(),
					label: "hotel Book".into(),
					kind: NodeKind::Action,
					domain: Some("hotel".into()),
					color: None,
				},
			],
			links: vec![],
		};
		let stats = GraphStats::compute(&snapshot);
		assert_eq!(stats.domain_counts.get("hotel"), Some(&2));
		assert_eq!(stats.domain_counts.len(), 1);
		assert_eq!(stats.most_connected, None);
	}

	#[test]
	fn strictly_larger_degree_wins_over_earlier_node() {
		let link = |s: &str, t: &str| GraphLink {
			source: s.into(),
			target: t.into(),
			weight: 1.0,
		};
		let snapshot = GraphSnapshot {
			nodes: vec![],
			links: vec![link("a", "b"), link("c", "b"), link("b", "d")],
		};
		let stats = GraphStats::compute(&snapshot);
		assert_eq!(stats.most_connected, Some(("b".into(), 3)));
	}
}
