//! Event-driven glue tying pointer input to the simulation, viewport, and
//! highlight state.
//!
//! Every handler applies its effect synchronously and pushes the affected
//! visual state through the render bridge, so a drag arriving between two
//! ticks is visible to the very next integration step. There is no
//! debouncing; the periodic tick loop is the only timer.

use super::adjacency::AdjacencyIndex;
use super::bridge::{Handle, RenderBridge};
use super::config::GraphConfig;
use super::error::GraphLoadError;
use super::highlight::HighlightState;
use super::simulation::ForceSimulation;
use super::types::{GraphData, GraphNode};
use super::viewport::ViewportTransform;

/// Owns the core state and a render bridge, exposing discrete handler
/// methods for hover, drag, zoom, and pan plus the tick entry point.
pub struct InteractionController<B: RenderBridge> {
	config: GraphConfig,
	/// Nodes sorted ascending by value; simulation and handles share this order.
	nodes: Vec<GraphNode>,
	adjacency: AdjacencyIndex,
	simulation: ForceSimulation,
	viewport: ViewportTransform,
	highlight: HighlightState,
	bridge: B,
	node_handles: Vec<Handle>,
	link_handles: Vec<Handle>,
	hovered: Option<usize>,
	dragging: Option<usize>,
}

impl<B: RenderBridge> InteractionController<B> {
	/// Load graph data, build the adjacency index and simulation, and
	/// register all visuals with the bridge. Fails before any simulation
	/// state exists if a link endpoint is unknown.
	pub fn new(
		data: &GraphData,
		config: GraphConfig,
		mut bridge: B,
	) -> Result<Self, GraphLoadError> {
		let mut nodes = data.nodes.clone();
		nodes.sort_by(|a, b| a.value.total_cmp(&b.value));

		let adjacency = AdjacencyIndex::build(&data.links);
		let simulation = ForceSimulation::new(&nodes, &data.links, &config)?;

		let node_handles: Vec<Handle> =
			nodes.iter().map(|n| bridge.create_node(n)).collect();
		let link_handles: Vec<Handle> =
			data.links.iter().map(|l| bridge.create_link(l)).collect();
		let viewport = ViewportTransform::new(config.zoom_scale_range);

		let mut controller = Self {
			config,
			nodes,
			adjacency,
			simulation,
			viewport,
			highlight: HighlightState::default(),
			bridge,
			node_handles,
			link_handles,
			hovered: None,
			dragging: None,
		};
		controller.bridge.apply_viewport_transform(controller.viewport.current());
		controller.apply_neutral_highlight();
		controller.push_geometry();
		Ok(controller)
	}

	pub fn simulation(&self) -> &ForceSimulation {
		&self.simulation
	}

	pub fn viewport(&self) -> &ViewportTransform {
		&self.viewport
	}

	pub fn bridge(&self) -> &B {
		&self.bridge
	}

	pub fn bridge_mut(&mut self) -> &mut B {
		&mut self.bridge
	}

	pub fn dragging(&self) -> Option<usize> {
		self.dragging
	}

	/// Advance the simulation one step and push the new geometry. Returns
	/// false (and pushes nothing) once the simulation has gone idle.
	pub fn tick(&mut self) -> bool {
		if self.simulation.tick() {
			self.push_geometry();
			true
		} else {
			false
		}
	}

	/// Hit-test screen coordinates against node display radii, preferring
	/// the topmost (last-drawn) node.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.viewport.screen_to_world(sx, sy);
		let positions = self.simulation.nodes();
		self.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(i, node)| {
				let (dx, dy) = (positions[*i].x - wx, positions[*i].y - wy);
				dx * dx + dy * dy <= node.radius() * node.radius()
			})
			.map(|(i, _)| i)
	}

	/// Update the hovered node. `None` is hover-out. A repeated value is a
	/// no-op, so callers can feed every pointer move through here.
	pub fn hover(&mut self, node: Option<usize>) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		match node {
			Some(index) => self.apply_focus_highlight(index),
			None => {
				self.highlight.clear();
				self.apply_neutral_highlight();
			}
		}
	}

	/// Begin dragging the node at `index`, pinning it at the pointer.
	/// Reheats an idle simulation so the layout responds while dragging.
	pub fn drag_start(&mut self, index: usize, sx: f64, sy: f64) {
		self.simulation.set_alpha_target(self.config.drag_alpha_target);
		if !self.simulation.is_running() {
			self.simulation.restart();
		}
		self.dragging = Some(index);
		self.pin_at_pointer(index, sx, sy);
	}

	/// Track the pointer: the dragged node's pinned position follows exactly.
	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		if let Some(index) = self.dragging {
			self.pin_at_pointer(index, sx, sy);
		}
	}

	/// Release the dragged node: clear the cooling floor and unpin, letting
	/// the simulation settle rather than stop abruptly.
	pub fn drag_end(&mut self) {
		self.simulation.set_alpha_target(0.0);
		if let Some(index) = self.dragging.take() {
			self.simulation.unpin(index);
		}
	}

	/// Absolute zoom anchored at `focal` (screen coordinates).
	pub fn zoom_to(&mut self, scale: f64, focal: (f64, f64)) {
		self.viewport.zoom_to(scale, focal);
		self.viewport_changed();
	}

	/// Multiplicative zoom anchored at `focal`; the wheel gesture.
	pub fn zoom_by(&mut self, factor: f64, focal: (f64, f64)) {
		self.viewport.zoom_by(factor, focal);
		self.viewport_changed();
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.viewport.pan_by(dx, dy);
		self.viewport_changed();
	}

	fn pin_at_pointer(&mut self, index: usize, sx: f64, sy: f64) {
		let (wx, wy) = self.viewport.screen_to_world(sx, sy);
		self.simulation.pin(index, wx, wy);
		self.push_geometry();
	}

	/// Re-apply geometry after a transform change so pan/zoom stays live
	/// even when the simulation is idle.
	fn viewport_changed(&mut self) {
		self.bridge.apply_viewport_transform(self.viewport.current());
		self.push_geometry();
	}

	fn push_geometry(&mut self) {
		let geometry = self.simulation.geometry();
		for (handle, &(x, y)) in self.node_handles.iter().zip(&geometry.nodes) {
			self.bridge.update_node_position(*handle, x, y);
		}
		for (handle, &(x1, y1, x2, y2)) in self.link_handles.iter().zip(&geometry.links) {
			self.bridge.update_link_endpoints(*handle, x1, y1, x2, y2);
		}
	}

	fn apply_focus_highlight(&mut self, focus: usize) {
		let ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
		let endpoints: Vec<(usize, usize)> = self
			.simulation
			.links()
			.iter()
			.map(|l| (l.source, l.target))
			.collect();
		self.highlight.set_focus(focus, &ids, &endpoints, &self.adjacency);

		for (i, handle) in self.node_handles.iter().enumerate() {
			if self.highlight.node_connected(i) {
				self.bridge.set_node_opacity(*handle, 1.0);
				self.bridge
					.set_label(*handle, self.config.highlight_label_size, 1.0);
			} else {
				self.bridge.set_node_opacity(*handle, self.config.fade_opacity);
				self.bridge.set_label(*handle, 0.0, 0.0);
			}
		}
		for (i, handle) in self.link_handles.iter().enumerate() {
			if self.highlight.link_incident(i) {
				self.bridge.set_link_emphasis(*handle, 1.0, true);
			} else {
				self.bridge
					.set_link_emphasis(*handle, self.config.fade_opacity, false);
			}
		}
	}

	fn apply_neutral_highlight(&mut self) {
		for handle in &self.node_handles {
			self.bridge.set_node_opacity(*handle, 1.0);
			self.bridge
				.set_label(*handle, self.config.label_size, self.config.label_opacity);
		}
		for handle in &self.link_handles {
			self.bridge
				.set_link_emphasis(*handle, self.config.link_opacity, false);
		}
	}
}
