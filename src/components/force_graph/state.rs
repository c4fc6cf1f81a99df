//! Layout engine and interaction state.
//!
//! Wraps `force_graph`'s simulation. Positions and pins live inside the
//! simulation's node storage owned here; the canonical [`GraphSnapshot`] is
//! never mutated by layout or drag.

use std::collections::HashMap;
use std::f32::consts::TAU;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::stats::GraphStats;
use super::types::{GraphSnapshot, NodeKind};

/// Half extents of the node shapes, in graph units.
pub const STATE_HALF_WIDTH: f64 = 65.0;
pub const ACTION_HALF_WIDTH: f64 = 75.0;
pub const NODE_HALF_HEIGHT: f64 = 25.0;

/// Zoom scale bounds; translation is unbounded.
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 4.0;

// Temperature of the relaxation. The simulation library has no cooling of its
// own, so the adapter carries a D3-style alpha: it decays toward a target each
// tick and the physics update stops once it drops below ALPHA_MIN.
const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY: f64 = 0.0228;
const DRAG_ALPHA_TARGET: f64 = 0.3;

const SEED_RADIUS: f32 = 150.0;

/// Per-node data carried through the simulation for rendering and tooltips.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub domain: Option<String>,
	/// Resolved fill color (explicit color or the kind default).
	pub color: String,
	/// Undirected degree in the canonical snapshot.
	pub degree: usize,
}

impl NodeInfo {
	/// Half width of the node's shape; actions are drawn wider (pill shaped).
	pub fn half_width(&self) -> f64 {
		match self.kind {
			NodeKind::State => STATE_HALF_WIDTH,
			NodeKind::Action => ACTION_HALF_WIDTH,
		}
	}
}

/// Per-edge data: the transition weight drives stroke thickness.
#[derive(Clone, Copy, Debug)]
pub struct EdgeInfo {
	pub weight: f64,
}

/// The affine pan/zoom transform applied to the whole drawing group.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Rescales about the screen point `(sx, sy)` so the graph point under the
	/// cursor stays put. Scale is clamped to [MIN_SCALE, MAX_SCALE].
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_SCALE, MAX_SCALE);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

#[derive(Clone, Debug, Default)]
struct DragState {
	node: Option<DefaultNodeIdx>,
}

#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

/// Hovered node plus the pointer position the tooltip is anchored to.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub screen_x: f64,
	pub screen_y: f64,
}

/// Simulation, view transform, and gesture state for one rendered snapshot.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	drag: DragState,
	pan: PanState,
	alpha: f64,
	alpha_target: f64,
}

impl ForceGraphState {
	/// Seeds the simulation from a canonical snapshot. Nodes start on a
	/// deterministic circle around the origin; the view transform centers the
	/// origin on the canvas. Links with unknown endpoints are skipped.
	pub fn new(data: &GraphSnapshot, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut id_to_idx = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f32) * TAU / data.nodes.len().max(1) as f32;
			let color = node
				.color
				.clone()
				.unwrap_or_else(|| node.kind.default_color().to_string());
			let idx = graph.add_node(NodeData {
				x: SEED_RADIUS * angle.cos(),
				y: SEED_RADIUS * angle.sin(),
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					kind: node.kind,
					domain: node.domain.clone(),
					color,
					degree: GraphStats::degree_of(data, &node.id),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			match (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(
						src,
						tgt,
						EdgeData {
							user_data: EdgeInfo {
								weight: link.weight,
							},
						},
					);
				}
				_ => warn!(
					"dropping link with unresolved endpoint: {} -> {}",
					link.source, link.target
				),
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			hover: HoverState::default(),
			width,
			height,
			drag: DragState::default(),
			pan: PanState::default(),
			alpha: 1.0,
			alpha_target: 0.0,
		}
	}

	/// Advances the relaxation by one tick unless it has cooled to a stop.
	pub fn tick(&mut self, dt: f32) {
		if self.is_frozen() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		self.graph.update(dt);
	}

	/// True once alpha has cooled below the motion threshold.
	pub fn is_frozen(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	fn reheat(&mut self) {
		self.alpha_target = DRAG_ALPHA_TARGET;
		self.alpha = self.alpha.max(DRAG_ALPHA_TARGET);
	}

	fn cool(&mut self) {
		self.alpha_target = 0.0;
	}

	/// Topmost node whose shape contains the given screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let dx = (node.x() as f64 - gx).abs();
			let dy = (node.y() as f64 - gy).abs();
			if dx <= node.data.user_data.half_width() && dy <= NODE_HALF_HEIGHT {
				found = Some(node.index());
			}
		});
		found
	}

	/// Starts a drag if a node is under the pointer: the node is pinned at its
	/// current position and the simulation is re-heated. Returns false when the
	/// pointer hit empty canvas (the caller starts a pan instead).
	pub fn begin_drag(&mut self, sx: f64, sy: f64) -> bool {
		let Some(idx) = self.node_at_position(sx, sy) else {
			return false;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = true;
			}
		});
		self.drag.node = Some(idx);
		self.reheat();
		true
	}

	/// Moves the pin to the pointer position (in graph coordinates).
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node else { return };
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = gx as f32;
				node.data.y = gy as f32;
			}
		});
	}

	/// Releases the pin and lets the simulation cool back down.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.cool();
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node.is_some()
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.transform.zoom_at(sx, sy, factor);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, sx: f64, sy: f64) {
		self.hover = HoverState {
			node,
			screen_x: sx,
			screen_y: sy,
		};
	}

	/// Current position of a node, in graph coordinates.
	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode, NodeKind};

	fn snapshot() -> GraphSnapshot {
		let node = |id: &str, kind: NodeKind| GraphNode {
			id: id.into(),
			label: id.into(),
			kind,
			domain: None,
			color: None,
		};
		GraphSnapshot {
			nodes: vec![node("a", NodeKind::State), node("b", NodeKind::Action)],
			links: vec![
				GraphLink {
					source: "a".into(),
					target: "b".into(),
					weight: 4.0,
				},
				GraphLink {
					source: "a".into(),
					target: "ghost".into(),
					weight: 1.0,
				},
			],
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&snapshot(), 900.0, 700.0)
	}

	fn screen_position_of(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let mut pos = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		let (gx, gy) = pos.expect("node exists");
		(
			gx * state.transform.k + state.transform.x,
			gy * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn dangling_links_are_dropped_at_insertion() {
		let s = state();
		let mut edge_count = 0;
		s.graph.visit_edges(|_, _, _| edge_count += 1);
		assert_eq!(edge_count, 1);
	}

	#[test]
	fn degrees_still_count_dangling_links() {
		let s = state();
		let mut degree_of_a = 0;
		s.graph.visit_nodes(|node| {
			if node.data.user_data.id == "a" {
				degree_of_a = node.data.user_data.degree;
			}
		});
		assert_eq!(degree_of_a, 2);
	}

	#[test]
	fn hit_testing_respects_shape_extents_and_transform() {
		let s = state();
		let (sx, sy) = screen_position_of(&s, "a");
		assert!(s.node_at_position(sx, sy).is_some());
		// Just past the state half width, still inside an action's.
		assert!(s
			.node_at_position(sx + STATE_HALF_WIDTH + 1.0, sy)
			.is_none());
	}

	#[test]
	fn drag_pins_node_at_pointer_until_release() {
		let mut s = state();
		let (sx, sy) = screen_position_of(&s, "a");
		assert!(s.begin_drag(sx, sy));
		s.drag_to(sx + 50.0, sy + 30.0);
		let expected = s.transform.screen_to_graph(sx + 50.0, sy + 30.0);
		for _ in 0..10 {
			s.tick(0.016);
		}
		let idx = s.node_at_position(sx + 50.0, sy + 30.0).expect("pinned node");
		let (gx, gy) = s.node_position(idx).unwrap();
		assert!((gx - expected.0).abs() < 0.5);
		assert!((gy - expected.1).abs() < 0.5);
		s.end_drag();
		assert!(!s.is_dragging());
		let mut anchored = false;
		s.graph.visit_nodes(|node| anchored |= node.data.is_anchor);
		assert!(!anchored, "pin must be cleared on release");
	}

	#[test]
	fn simulation_freezes_then_reheats_on_drag() {
		let mut s = state();
		for _ in 0..500 {
			s.tick(0.016);
		}
		assert!(s.is_frozen());
		let (sx, sy) = screen_position_of(&s, "a");
		assert!(s.begin_drag(sx, sy));
		assert!(!s.is_frozen());
		s.end_drag();
		for _ in 0..500 {
			s.tick(0.016);
		}
		assert!(s.is_frozen());
	}

	#[test]
	fn missing_drag_target_starts_no_drag() {
		let mut s = state();
		assert!(!s.begin_drag(-5000.0, -5000.0));
		assert!(!s.is_dragging());
	}

	#[test]
	fn zoom_clamps_scale() {
		let mut t = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		for _ in 0..100 {
			t.zoom_at(450.0, 350.0, 1.1);
		}
		assert!((t.k - MAX_SCALE).abs() < 1e-9);
		for _ in 0..200 {
			t.zoom_at(450.0, 350.0, 0.9);
		}
		assert!((t.k - MIN_SCALE).abs() < 1e-9);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut t = ViewTransform {
			x: 120.0,
			y: -40.0,
			k: 1.0,
		};
		let before = t.screen_to_graph(300.0, 200.0);
		t.zoom_at(300.0, 200.0, 1.1);
		let after = t.screen_to_graph(300.0, 200.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn pan_translates_without_scaling() {
		let mut s = state();
		let k = s.transform.k;
		s.begin_pan(10.0, 10.0);
		s.pan_to(60.0, -20.0);
		s.end_pan();
		assert_eq!(s.transform.x, 900.0 / 2.0 + 50.0);
		assert_eq!(s.transform.y, 700.0 / 2.0 - 30.0);
		assert_eq!(s.transform.k, k);
	}
}
