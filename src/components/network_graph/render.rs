//! Canvas implementation of the render bridge.
//!
//! Retains per-handle visual state pushed by the controller and draws it
//! each frame: background, links (with direction markers while emphasized),
//! node circles, then labels. Opacity and label-size changes ease toward
//! their targets over the configured transition duration; positions apply
//! immediately.

use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::bridge::{Handle, RenderBridge};
use super::config::GraphConfig;
use super::types::{GraphLink, GraphNode};
use super::viewport::Transform;

/// 3-class RdPu palette, assigned to category values in encounter order.
const PALETTE: [&str; 3] = ["#fde0dd", "#fa9fb5", "#c51b8a"];

/// Ordinal category -> color scale with a fixed palette.
#[derive(Clone, Debug, Default)]
struct OrdinalScale {
	domain: Vec<String>,
}

impl OrdinalScale {
	fn color_for(&mut self, category: &str) -> &'static str {
		let index = match self.domain.iter().position(|c| c == category) {
			Some(i) => i,
			None => {
				self.domain.push(category.to_string());
				self.domain.len() - 1
			}
		};
		PALETTE[index % PALETTE.len()]
	}
}

/// Exponential step from `current` toward `target`.
fn ease_toward(current: f64, target: f64, factor: f64) -> f64 {
	current + (target - current) * factor
}

#[derive(Clone, Debug)]
struct NodeVisual {
	x: f64,
	y: f64,
	radius: f64,
	color: &'static str,
	label: Option<String>,
	// TODO: fetch `image` via HtmlImageElement and clip-draw it over the circle.
	#[allow(dead_code)]
	image: Option<String>,
	opacity: f64,
	target_opacity: f64,
	label_size: f64,
	target_label_size: f64,
	label_opacity: f64,
	target_label_opacity: f64,
}

#[derive(Clone, Debug)]
struct LinkVisual {
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	width: f64,
	opacity: f64,
	target_opacity: f64,
	marker: bool,
}

enum Slot {
	Node(usize),
	Link(usize),
}

/// Render bridge drawing to a 2D canvas context.
pub struct CanvasBridge {
	width: f64,
	height: f64,
	transition_ms: f64,
	label_size: f64,
	label_opacity: f64,
	link_opacity: f64,
	transform: Transform,
	palette: OrdinalScale,
	nodes: Vec<NodeVisual>,
	links: Vec<LinkVisual>,
	slots: HashMap<Handle, Slot>,
	next_handle: Handle,
}

impl CanvasBridge {
	pub fn new(config: &GraphConfig) -> Self {
		Self {
			width: config.width,
			height: config.height,
			transition_ms: config.transition_ms,
			label_size: config.label_size,
			label_opacity: config.label_opacity,
			link_opacity: config.link_opacity,
			transform: Transform::default(),
			palette: OrdinalScale::default(),
			nodes: Vec::new(),
			links: Vec::new(),
			slots: HashMap::new(),
			next_handle: 0,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn mint(&mut self, slot: Slot) -> Handle {
		let handle = self.next_handle;
		self.next_handle += 1;
		self.slots.insert(handle, slot);
		handle
	}

	fn node_mut(&mut self, handle: Handle) -> Option<&mut NodeVisual> {
		match self.slots.get(&handle) {
			Some(&Slot::Node(i)) => self.nodes.get_mut(i),
			_ => None,
		}
	}

	fn link_mut(&mut self, handle: Handle) -> Option<&mut LinkVisual> {
		match self.slots.get(&handle) {
			Some(&Slot::Link(i)) => self.links.get_mut(i),
			_ => None,
		}
	}

	/// Advance transitions by `dt` seconds and draw the frame.
	pub fn present(&mut self, ctx: &CanvasRenderingContext2d, dt: f64) {
		// Reaches ~95% of the way to target in one transition duration.
		let factor = 1.0 - (-3.0 * dt * 1000.0 / self.transition_ms).exp();
		for node in &mut self.nodes {
			node.opacity = ease_toward(node.opacity, node.target_opacity, factor);
			node.label_size = ease_toward(node.label_size, node.target_label_size, factor);
			node.label_opacity =
				ease_toward(node.label_opacity, node.target_label_opacity, factor);
		}
		for link in &mut self.links {
			link.opacity = ease_toward(link.opacity, link.target_opacity, factor);
		}

		ctx.set_fill_style_str("#ffffff");
		ctx.fill_rect(0.0, 0.0, self.width, self.height);

		ctx.save();
		let _ = ctx.translate(self.transform.tx, self.transform.ty);
		let _ = ctx.scale(self.transform.scale, self.transform.scale);

		self.draw_links(ctx);
		self.draw_nodes(ctx);

		ctx.restore();
	}

	fn draw_links(&self, ctx: &CanvasRenderingContext2d) {
		for link in &self.links {
			ctx.set_global_alpha(link.opacity);
			ctx.set_stroke_style_str("#222222");
			ctx.set_line_width(link.width);
			ctx.begin_path();
			ctx.move_to(link.x1, link.y1);
			ctx.line_to(link.x2, link.y2);
			ctx.stroke();

			if link.marker {
				self.draw_marker(ctx, link);
			}
		}
		ctx.set_global_alpha(1.0);
	}

	/// Arrowhead at the target end, pointing along the link.
	fn draw_marker(&self, ctx: &CanvasRenderingContext2d, link: &LinkVisual) {
		let (dx, dy) = (link.x2 - link.x1, link.y2 - link.y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let size = 6.0;

		let (tip_x, tip_y) = (link.x2, link.y2);
		let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
		let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

		ctx.set_fill_style_str("#222222");
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}

	fn draw_nodes(&self, ctx: &CanvasRenderingContext2d) {
		for node in &self.nodes {
			ctx.set_global_alpha(node.opacity);
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(node.color);
			ctx.fill();
			ctx.set_stroke_style_str("#000000");
			ctx.set_line_width(1.0);
			ctx.stroke();

			if let Some(label) = &node.label {
				if node.label_size > 0.5 && node.label_opacity > 0.01 {
					ctx.set_global_alpha(node.label_opacity);
					ctx.set_fill_style_str("#000000");
					ctx.set_font(&format!("{}px sans-serif", node.label_size));
					let _ = ctx.fill_text(label, node.x + 26.0, node.y);
				}
			}
		}
		ctx.set_global_alpha(1.0);
	}
}

impl RenderBridge for CanvasBridge {
	fn create_node(&mut self, node: &GraphNode) -> Handle {
		let visual = NodeVisual {
			x: 0.0,
			y: 0.0,
			radius: node.radius(),
			color: self.palette.color_for(&node.categories),
			label: node.display_text().map(str::to_owned),
			image: node.image.clone(),
			opacity: 1.0,
			target_opacity: 1.0,
			label_size: self.label_size,
			target_label_size: self.label_size,
			label_opacity: self.label_opacity,
			target_label_opacity: self.label_opacity,
		};
		self.nodes.push(visual);
		self.mint(Slot::Node(self.nodes.len() - 1))
	}

	fn create_link(&mut self, link: &GraphLink) -> Handle {
		let visual = LinkVisual {
			x1: 0.0,
			y1: 0.0,
			x2: 0.0,
			y2: 0.0,
			width: link.value.max(0.0).sqrt(),
			opacity: self.link_opacity,
			target_opacity: self.link_opacity,
			marker: false,
		};
		self.links.push(visual);
		self.mint(Slot::Link(self.links.len() - 1))
	}

	fn update_node_position(&mut self, handle: Handle, x: f64, y: f64) {
		if let Some(node) = self.node_mut(handle) {
			node.x = x;
			node.y = y;
		}
	}

	fn update_link_endpoints(&mut self, handle: Handle, x1: f64, y1: f64, x2: f64, y2: f64) {
		if let Some(link) = self.link_mut(handle) {
			link.x1 = x1;
			link.y1 = y1;
			link.x2 = x2;
			link.y2 = y2;
		}
	}

	fn set_node_opacity(&mut self, handle: Handle, opacity: f64) {
		if let Some(node) = self.node_mut(handle) {
			node.target_opacity = opacity;
		}
	}

	fn set_link_emphasis(&mut self, handle: Handle, opacity: f64, marker: bool) {
		if let Some(link) = self.link_mut(handle) {
			link.target_opacity = opacity;
			link.marker = marker;
		}
	}

	fn set_label(&mut self, handle: Handle, size: f64, opacity: f64) {
		if let Some(node) = self.node_mut(handle) {
			node.target_label_size = size;
			node.target_label_opacity = opacity;
		}
	}

	fn apply_viewport_transform(&mut self, transform: Transform) {
		self.transform = transform;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordinal_scale_is_stable_and_cycles() {
		let mut scale = OrdinalScale::default();
		let first = scale.color_for("rock");
		let second = scale.color_for("jazz");
		assert_ne!(first, second);
		assert_eq!(scale.color_for("rock"), first);
		// Fourth distinct category wraps around the palette.
		scale.color_for("pop");
		assert_eq!(scale.color_for("folk"), first);
	}

	#[test]
	fn ease_converges_to_target() {
		let mut value = 1.0;
		for _ in 0..100 {
			value = ease_toward(value, 0.1, 0.3);
		}
		assert!((value - 0.1).abs() < 1e-6);
	}

	#[test]
	fn bridge_retains_pushed_state() {
		let mut bridge = CanvasBridge::new(&GraphConfig::default());
		let node = GraphNode {
			id: "a".into(),
			value: 40.0,
			categories: "rock".into(),
			label: Some("A".into()),
			title: None,
			image: None,
		};
		let handle = bridge.create_node(&node);
		bridge.update_node_position(handle, 3.0, 4.0);
		bridge.set_node_opacity(handle, 0.1);

		let visual = &bridge.nodes[0];
		assert_eq!((visual.x, visual.y), (3.0, 4.0));
		assert_eq!(visual.radius, 20.0);
		assert_eq!(visual.target_opacity, 0.1);
		// Current opacity only moves during present().
		assert_eq!(visual.opacity, 1.0);
	}

	#[test]
	fn unknown_handles_are_ignored() {
		let mut bridge = CanvasBridge::new(&GraphConfig::default());
		bridge.update_node_position(99, 1.0, 2.0);
		bridge.set_link_emphasis(42, 1.0, true);
	}
}
