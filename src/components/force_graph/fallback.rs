//! Deterministic sample graph used when the API is unreachable.

use super::types::{GraphLink, GraphNode, GraphSnapshot, NodeKind};

const DOMAINS: [&str; 5] = ["hotel", "restaurant", "train", "attraction", "taxi"];

/// Pairs of domains bridged by a synthetic multi-domain transition state.
const MULTI_DOMAINS: [(&str, &str); 3] = [
	("hotel", "restaurant"),
	("train", "hotel"),
	("restaurant", "attraction"),
];

fn slots_for(domain: &str) -> &'static [&'static str] {
	match domain {
		"hotel" => &["price", "type", "area", "stars", "parking"],
		"restaurant" => &["price", "food", "area", "name", "time"],
		"train" => &["departure", "destination", "day", "time"],
		"attraction" => &["type", "area", "name"],
		"taxi" => &["departure", "destination", "time"],
		_ => &["name", "type"],
	}
}

fn node(id: String, label: String, kind: NodeKind, domain: Option<&str>, color: &str) -> GraphNode {
	GraphNode {
		id,
		label,
		kind,
		domain: domain.map(str::to_string),
		color: Some(color.to_string()),
	}
}

fn link(source: String, target: String, weight: f64) -> GraphLink {
	GraphLink {
		source,
		target,
		weight,
	}
}

/// Builds the sample state-action space: per-domain slot-filling pipelines
/// hanging off shared start/greeting and end/goodbye nodes, plus multi-domain
/// transition states. No randomness; repeated calls yield identical snapshots.
pub fn sample_snapshot() -> GraphSnapshot {
	let mut nodes = vec![
		node("start".into(), "Start".into(), NodeKind::State, None, "green"),
		node("end".into(), "End".into(), NodeKind::State, None, "red"),
		node(
			"greeting".into(),
			"Greeting".into(),
			NodeKind::Action,
			None,
			"lightgray",
		),
		node(
			"goodbye".into(),
			"Goodbye".into(),
			NodeKind::Action,
			None,
			"lightgray",
		),
	];
	let mut links = vec![
		link("start".into(), "greeting".into(), 5.0),
		link("end".into(), "goodbye".into(), 5.0),
	];

	for domain in DOMAINS {
		let d = domain;
		nodes.push(node(
			format!("{d}_active"),
			format!("{d} Active"),
			NodeKind::State,
			Some(d),
			"lightblue",
		));
		nodes.push(node(
			format!("{d}_booking"),
			format!("{d} Booking"),
			NodeKind::State,
			Some(d),
			"lightblue",
		));
		nodes.push(node(
			format!("{d}_booked"),
			format!("{d} Booked"),
			NodeKind::State,
			Some(d),
			"lightgreen",
		));
		nodes.push(node(
			format!("{d}-request"),
			format!("{d} Request"),
			NodeKind::Action,
			Some(d),
			"yellow",
		));
		nodes.push(node(
			format!("{d}-inform"),
			format!("{d} Inform"),
			NodeKind::Action,
			Some(d),
			"lightpink",
		));
		nodes.push(node(
			format!("{d}-book"),
			format!("{d} Book"),
			NodeKind::Action,
			Some(d),
			"purple",
		));

		// Only the two leading slots of each domain appear in the sample.
		let main_slots = &slots_for(d)[..2];
		for slot in main_slots {
			nodes.push(node(
				format!("{d}_{slot}_filled"),
				format!("{d} {slot} Filled"),
				NodeKind::State,
				Some(d),
				"lightblue",
			));
			nodes.push(node(
				format!("{d}-request-{slot}"),
				format!("{d} Request {slot}"),
				NodeKind::Action,
				Some(d),
				"yellow",
			));
		}

		links.push(link("greeting".into(), format!("{d}_active"), 2.0));
		for slot in main_slots {
			links.push(link(format!("{d}_active"), format!("{d}-request-{slot}"), 3.0));
			links.push(link(
				format!("{d}-request-{slot}"),
				format!("{d}_{slot}_filled"),
				3.0,
			));
		}
		links.push(link(
			format!("{d}_{}_filled", main_slots[0]),
			format!("{d}_{}_filled", main_slots[1]),
			2.0,
		));
		links.push(link(
			format!("{d}_{}_filled", main_slots[1]),
			format!("{d}-inform"),
			2.0,
		));
		links.push(link(format!("{d}-inform"), format!("{d}_booking"), 2.0));
		links.push(link(format!("{d}_booking"), format!("{d}-book"), 3.0));
		links.push(link(format!("{d}-book"), format!("{d}_booked"), 3.0));
		links.push(link(format!("{d}_booked"), "end".into(), 2.0));
	}

	for (from, to) in MULTI_DOMAINS {
		let id = format!("multi_domain_{from}_{to}");
		nodes.push(node(
			id.clone(),
			format!("Multi Domain {from} {to}"),
			NodeKind::State,
			None,
			"purple",
		));
		links.push(link(format!("{from}_booked"), id.clone(), 1.0));
		links.push(link(id, format!("{to}_active"), 1.0));
	}

	GraphSnapshot { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_are_fixed() {
		let snapshot = sample_snapshot();
		// 4 global + 5 domains x 10 + 3 multi-domain transition states.
		assert_eq!(snapshot.nodes.len(), 57);
		// 2 global + 5 domains x 11 + 3 transitions x 2.
		assert_eq!(snapshot.links.len(), 63);
	}

	#[test]
	fn generation_is_reproducible() {
		assert_eq!(sample_snapshot(), sample_snapshot());
	}

	#[test]
	fn exactly_one_of_each_global_node() {
		let snapshot = sample_snapshot();
		for id in ["start", "end", "greeting", "goodbye"] {
			let count = snapshot.nodes.iter().filter(|n| n.id == id).count();
			assert_eq!(count, 1, "expected exactly one {id} node");
		}
	}

	#[test]
	fn ids_are_unique() {
		let snapshot = sample_snapshot();
		let mut ids: Vec<&str> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), snapshot.nodes.len());
	}

	#[test]
	fn every_link_endpoint_resolves() {
		let snapshot = sample_snapshot();
		let ids: std::collections::HashSet<&str> =
			snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
		for link in &snapshot.links {
			assert!(ids.contains(link.source.as_str()), "dangling {}", link.source);
			assert!(ids.contains(link.target.as_str()), "dangling {}", link.target);
		}
	}

	#[test]
	fn domain_filter_of_sample_keeps_that_domain_only() {
		let hotel = sample_snapshot().filter_domain("hotel");
		// 4 globals + the 10 hotel nodes; multi-domain states carry no domain tag.
		assert_eq!(hotel.nodes.len(), 14);
		assert!(hotel
			.nodes
			.iter()
			.all(|n| n.domain.is_none() || n.domain.as_deref() == Some("hotel")));
	}
}
