use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

/// Fixed palette; a node's color is its id hash modulo the palette size.
const PALETTE: &[&str] = &[
	"#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
	"#bc80bd", "#ccebc5",
];

/// Radius floor so near-zero-weight contributors stay visible and clickable.
pub const MIN_NODE_RADIUS: f64 = 5.0;
/// Radius of the heaviest contributor in the dataset.
pub const MAX_NODE_RADIUS: f64 = 20.0;
/// Extra slack around a node's radius for pointer hit testing.
const HIT_SLACK: f64 = 4.0;

/// Target separation for connected nodes, independent of edge weight.
const LINK_DISTANCE: f64 = 100.0;
/// Fraction of the link-distance error corrected per step.
const LINK_STRENGTH: f64 = 0.08;
/// Fraction of the centroid-to-center offset corrected per step.
const CENTER_STRENGTH: f64 = 0.05;
/// Minimum gap between node edges enforced by collision avoidance.
const COLLISION_PADDING: f64 = 2.0;

/// How fast a reheated simulation cools back down, per step.
const ALPHA_DECAY: f64 = 0.995;
/// Step-size scale never drops below this, so the layout keeps settling.
const MIN_ALPHA_SCALE: f64 = 0.25;

/// Per-node payload carried inside the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: String,
	pub radius: f64,
	pub val: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
}

/// Owns the force simulation for one contributor dataset. Rebuilt whenever
/// the dataset changes identity; `step` is synchronous so tests can drive
/// the layout without a frame scheduler.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub drag: DragState,
	pub hover: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	alpha: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx, f64)>,
	order: Vec<DefaultNodeIdx>,
}

/// 32-bit string hash, `h = h * 31 + code_unit` over UTF-16 code units with
/// wrapping arithmetic, so non-ASCII names pick the same palette slot a
/// JavaScript `charCodeAt` loop would.
fn hash_id(id: &str) -> u32 {
	let mut h: i32 = 0;
	for unit in id.encode_utf16() {
		h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
	}
	h.unsigned_abs()
}

/// Palette color for a node id; stable across renders and datasets.
pub fn color_for_id(id: &str) -> &'static str {
	PALETTE[hash_id(id) as usize % PALETTE.len()]
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let mut order = Vec::new();

		let max_val = data.nodes.iter().map(|n| n.val).fold(1.0_f64, f64::max);

		for (i, node) in data.nodes.iter().enumerate() {
			let radius = (node.val / max_val * MAX_NODE_RADIUS).max(MIN_NODE_RADIUS);
			let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.id.clone(),
					color: color_for_id(&node.id).into(),
					radius,
					val: node.val,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
			order.push(idx);
		}

		// Edges referencing unknown ids are dropped rather than trusted.
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt, link.value));
			}
		}

		Self {
			graph,
			edges,
			order,
			drag: DragState::default(),
			hover: None,
			width,
			height,
			alpha: 1.0,
		}
	}

	/// Rendered edges with their weights.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx, f64)] {
		&self.edges
	}

	#[cfg(test)]
	fn node_count(&self) -> usize {
		self.order.len()
	}

	/// Raise the simulation energy so the layout visibly reacts.
	pub fn reheat(&mut self) {
		self.alpha = 1.0;
	}

	/// One simulation step: integrate the spring/charge forces, then apply
	/// the link-distance, centering, collision, and bounds passes.
	pub fn step(&mut self, dt: f32) {
		let scale = MIN_ALPHA_SCALE + (1.0 - MIN_ALPHA_SCALE) * self.alpha;
		self.graph.update(dt * scale as f32);
		self.alpha *= ALPHA_DECAY;
		self.apply_constraints();
	}

	fn apply_constraints(&mut self) {
		let mut pos: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
		let mut meta: HashMap<DefaultNodeIdx, (f64, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			pos.insert(node.index(), (node.x() as f64, node.y() as f64));
			meta.insert(
				node.index(),
				(node.data.user_data.radius, node.data.is_anchor),
			);
		});

		let movable = |idx: DefaultNodeIdx| !meta[&idx].1;

		// Link force: relax each edge toward the fixed target separation.
		for &(src, tgt, _) in &self.edges {
			let (x1, y1) = pos[&src];
			let (x2, y2) = pos[&tgt];
			let (dx, dy) = (x2 - x1, y2 - y1);
			let dist = (dx * dx + dy * dy).sqrt().max(0.001);
			let correction = (dist - LINK_DISTANCE) / dist * LINK_STRENGTH;
			let (cx, cy) = (dx * correction, dy * correction);
			if movable(src) {
				let p = pos.get_mut(&src).unwrap();
				p.0 += cx / 2.0;
				p.1 += cy / 2.0;
			}
			if movable(tgt) {
				let p = pos.get_mut(&tgt).unwrap();
				p.0 -= cx / 2.0;
				p.1 -= cy / 2.0;
			}
		}

		// Centering: pull the whole layout's centroid toward the viewport
		// center rather than per-node, so relative structure is preserved.
		if !self.order.is_empty() {
			let n = self.order.len() as f64;
			let (sx, sy) = pos.values().fold((0.0, 0.0), |(ax, ay), &(x, y)| {
				(ax + x, ay + y)
			});
			let (ox, oy) = (
				(self.width / 2.0 - sx / n) * CENTER_STRENGTH,
				(self.height / 2.0 - sy / n) * CENTER_STRENGTH,
			);
			for &idx in &self.order {
				if movable(idx) {
					let p = pos.get_mut(&idx).unwrap();
					p.0 += ox;
					p.1 += oy;
				}
			}
		}

		// Collision avoidance: push overlapping pairs apart to a minimum
		// separation of both radii plus padding.
		for i in 0..self.order.len() {
			for j in (i + 1)..self.order.len() {
				let (a, b) = (self.order[i], self.order[j]);
				let (x1, y1) = pos[&a];
				let (x2, y2) = pos[&b];
				let (dx, dy) = (x2 - x1, y2 - y1);
				let dist = (dx * dx + dy * dy).sqrt().max(0.001);
				let min_dist = meta[&a].0 + meta[&b].0 + COLLISION_PADDING;
				if dist >= min_dist {
					continue;
				}
				let push = (min_dist - dist) / dist / 2.0;
				let (px, py) = (dx * push, dy * push);
				if movable(a) {
					let p = pos.get_mut(&a).unwrap();
					p.0 -= px;
					p.1 -= py;
				}
				if movable(b) {
					let p = pos.get_mut(&b).unwrap();
					p.0 += px;
					p.1 += py;
				}
			}
		}

		// Bounds: no node center may leave the canvas minus its radius,
		// pinned or not.
		for &idx in &self.order {
			let radius = meta[&idx].0;
			let p = pos.get_mut(&idx).unwrap();
			p.0 = p.0.clamp(radius, (self.width - radius).max(radius));
			p.1 = p.1.clamp(radius, (self.height - radius).max(radius));
		}

		self.graph.visit_nodes_mut(|node| {
			if let Some(&(x, y)) = pos.get(&node.index()) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}

	/// The node whose hit circle contains the given canvas position.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<DefaultNodeIdx> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - x, node.y() as f64 - y);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_SLACK {
				found = Some(node.index());
			}
		});
		found
	}

	/// Begin dragging whatever node sits under the pointer. The node is
	/// pinned to the pointer until the drag ends. Returns whether a drag
	/// actually started.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		let Some(idx) = self.node_at_position(x, y) else {
			return false;
		};
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.pin(idx, x, y);
		self.reheat();
		true
	}

	/// Move the dragged node to the pointer, kept inside the canvas.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		if let Some(idx) = self.drag.node_idx {
			self.pin(idx, x, y);
		}
	}

	/// End the drag and release the pin, returning the node to free
	/// dynamics.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
	}

	fn pin(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		let (width, height) = (self.width, self.height);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				let radius = node.data.user_data.radius;
				node.data.x = x.clamp(radius, (width - radius).max(radius)) as f32;
				node.data.y = y.clamp(radius, (height - radius).max(radius)) as f32;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hover = node;
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover == Some(idx)
	}

	#[cfg(test)]
	fn pinned_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|node| {
			if node.data.is_anchor {
				count += 1;
			}
		});
		count
	}

	#[cfg(test)]
	fn positions(&self) -> Vec<(f64, f64, f64)> {
		let mut out = Vec::new();
		self.graph.visit_nodes(|node| {
			out.push((
				node.x() as f64,
				node.y() as f64,
				node.data.user_data.radius,
			));
		});
		out
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{GraphLink, GraphNode};
	use super::*;

	fn graph(nodes: &[(&str, f64)], links: &[(&str, &str, f64)]) -> GraphData {
		GraphData {
			nodes: nodes
				.iter()
				.map(|(id, val)| GraphNode {
					id: (*id).into(),
					val: *val,
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t, v)| GraphLink {
					source: (*s).into(),
					target: (*t).into(),
					value: *v,
				})
				.collect(),
		}
	}

	#[test]
	fn unknown_edge_endpoints_are_skipped() {
		let data = graph(
			&[("alice", 5.0), ("bob", 3.0)],
			&[("alice", "bob", 2.0), ("alice", "ghost", 9.0)],
		);
		let state = ForceGraphState::new(&data, 400.0, 300.0);
		assert_eq!(state.node_count(), 2);
		assert_eq!(state.edges().len(), 1);
	}

	#[test]
	fn positions_stay_within_bounds_across_steps() {
		let data = graph(
			&[("a", 10.0), ("b", 8.0), ("c", 1.0), ("d", 0.5)],
			&[("a", "b", 4.0), ("b", "c", 1.0), ("c", "d", 1.0)],
		);
		// Deliberately cramped canvas so the repulsion pushes hard.
		let mut state = ForceGraphState::new(&data, 120.0, 80.0);
		for _ in 0..300 {
			state.step(0.016);
		}
		for (x, y, radius) in state.positions() {
			assert!(x >= radius && x <= 120.0 - radius, "x={x} r={radius}");
			assert!(y >= radius && y <= 80.0 - radius, "y={y} r={radius}");
		}
	}

	#[test]
	fn drag_pins_and_release_unpins() {
		let data = graph(&[("solo", 3.0)], &[]);
		let mut state = ForceGraphState::new(&data, 400.0, 300.0);
		let (x, y, _) = state.positions()[0];

		assert!(state.begin_drag(x, y));
		assert_eq!(state.pinned_count(), 1);

		state.drag_to(200.0, 150.0);
		let (nx, ny, _) = state.positions()[0];
		assert!((nx - 200.0).abs() < 0.01 && (ny - 150.0).abs() < 0.01);

		state.end_drag();
		assert_eq!(state.pinned_count(), 0);
		assert!(!state.drag.active);
	}

	#[test]
	fn dragged_node_holds_position_through_steps() {
		let data = graph(&[("a", 3.0), ("b", 2.0)], &[("a", "b", 1.0)]);
		let mut state = ForceGraphState::new(&data, 400.0, 300.0);
		let (x, y, _) = state.positions()[0];
		assert!(state.begin_drag(x, y));
		state.drag_to(50.0, 50.0);
		for _ in 0..20 {
			state.step(0.016);
		}
		let (nx, ny, _) = state.positions()[0];
		assert!((nx - 50.0).abs() < 0.01 && (ny - 50.0).abs() < 0.01);
	}

	#[test]
	fn drag_off_background_is_a_no_op() {
		let data = graph(&[("a", 3.0)], &[]);
		let mut state = ForceGraphState::new(&data, 400.0, 300.0);
		assert!(!state.begin_drag(0.0, 0.0));
		assert_eq!(state.pinned_count(), 0);
	}

	#[test]
	fn radius_scales_with_weight_and_floors() {
		let data = graph(&[("heavy", 50.0), ("light", 0.0)], &[]);
		let state = ForceGraphState::new(&data, 400.0, 300.0);
		let radii: Vec<f64> = state.positions().iter().map(|p| p.2).collect();
		assert!((radii[0] - MAX_NODE_RADIUS).abs() < f64::EPSILON);
		assert!((radii[1] - MIN_NODE_RADIUS).abs() < f64::EPSILON);
	}

	#[test]
	fn node_color_is_deterministic_per_id() {
		let first = color_for_id("Alice Developer");
		let second = color_for_id("Alice Developer");
		assert_eq!(first, second);
		assert!(PALETTE.contains(&first));
	}

	#[test]
	fn non_ascii_ids_hash_over_utf16_code_units() {
		// "José" hashes J, o, s, then U+00E9 as a single code unit 233:
		// ((74 * 31 + 111) * 31 + 115) * 31 + 233 = 2315003, slot 3.
		assert_eq!(color_for_id("José"), PALETTE[3]);
	}
}
