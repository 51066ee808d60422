//! Contract between the core and the drawing layer.
//!
//! The core pushes plain data through this trait after every tick and after
//! every highlight or viewport change; it never reads anything back. Handles
//! are opaque tokens the bridge mints at creation time.

use super::types::{GraphLink, GraphNode};
use super::viewport::Transform;

/// Opaque token identifying a visual created by the bridge.
pub type Handle = usize;

/// Drawing and visual-state service consumed by the interaction controller.
pub trait RenderBridge {
	/// Register a node visual. Color, radius, and label styling derive from
	/// the node's own fields; absent optionals mean "skip that visual".
	fn create_node(&mut self, node: &GraphNode) -> Handle;

	/// Register a link visual.
	fn create_link(&mut self, link: &GraphLink) -> Handle;

	fn update_node_position(&mut self, handle: Handle, x: f64, y: f64);

	fn update_link_endpoints(&mut self, handle: Handle, x1: f64, y1: f64, x2: f64, y2: f64);

	fn set_node_opacity(&mut self, handle: Handle, opacity: f64);

	/// Link stroke opacity plus the direction marker toggle used while a
	/// hover emphasizes directly-incident links.
	fn set_link_emphasis(&mut self, handle: Handle, opacity: f64, marker: bool);

	/// Label font size and opacity. Size zero hides the label.
	fn set_label(&mut self, handle: Handle, size: f64, opacity: f64);

	fn apply_viewport_transform(&mut self, transform: Transform);
}

#[cfg(test)]
pub(crate) mod recording {
	//! A bridge double that records the last value pushed per handle, for
	//! asserting controller behavior without a canvas.

	use std::collections::HashMap;

	use super::*;

	#[derive(Debug, Default)]
	pub struct RecordingBridge {
		next_handle: Handle,
		pub node_positions: HashMap<Handle, (f64, f64)>,
		pub link_endpoints: HashMap<Handle, (f64, f64, f64, f64)>,
		pub node_opacity: HashMap<Handle, f64>,
		pub link_emphasis: HashMap<Handle, (f64, bool)>,
		pub labels: HashMap<Handle, (f64, f64)>,
		pub transform: Option<Transform>,
		pub geometry_pushes: usize,
	}

	impl RenderBridge for RecordingBridge {
		fn create_node(&mut self, _node: &GraphNode) -> Handle {
			self.next_handle += 1;
			self.next_handle - 1
		}

		fn create_link(&mut self, _link: &GraphLink) -> Handle {
			self.next_handle += 1;
			self.next_handle - 1
		}

		fn update_node_position(&mut self, handle: Handle, x: f64, y: f64) {
			self.node_positions.insert(handle, (x, y));
			self.geometry_pushes += 1;
		}

		fn update_link_endpoints(
			&mut self,
			handle: Handle,
			x1: f64,
			y1: f64,
			x2: f64,
			y2: f64,
		) {
			self.link_endpoints.insert(handle, (x1, y1, x2, y2));
		}

		fn set_node_opacity(&mut self, handle: Handle, opacity: f64) {
			self.node_opacity.insert(handle, opacity);
		}

		fn set_link_emphasis(&mut self, handle: Handle, opacity: f64, marker: bool) {
			self.link_emphasis.insert(handle, (opacity, marker));
		}

		fn set_label(&mut self, handle: Handle, size: f64, opacity: f64) {
			self.labels.insert(handle, (size, opacity));
		}

		fn apply_viewport_transform(&mut self, transform: Transform) {
			self.transform = Some(transform);
		}
	}
}
