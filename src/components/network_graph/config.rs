//! Tunable configuration for the graph component.

/// All recognized options, with the defaults the component ships with.
///
/// The solver constants (`link_distance`, `charge`, `alpha_min`,
/// `velocity_decay`) rarely need touching; the visual options
/// (`link_opacity`, `fade_opacity`, `transition_ms`) are the usual knobs.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Spring strength of the link force. Deliberately weak so unrelated
	/// clusters do not collapse together.
	pub link_strength: f64,
	/// Rest separation of linked nodes, in world units.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge: f64,
	/// Zoom scale clamp range `(min, max)`.
	pub zoom_scale_range: (f64, f64),
	/// Default link stroke opacity when nothing is hovered.
	pub link_opacity: f64,
	/// Default label opacity when nothing is hovered.
	pub label_opacity: f64,
	/// Opacity that non-connected elements fade to during hover.
	pub fade_opacity: f64,
	/// Duration of highlight fade transitions, in milliseconds.
	pub transition_ms: f64,
	/// Alpha floor below which the simulation goes idle.
	pub alpha_min: f64,
	/// Velocity multiplier applied each tick (friction).
	pub velocity_decay: f64,
	/// Alpha floor forced while a drag is active, keeping the layout live.
	pub drag_alpha_target: f64,
	/// Label font size at rest, in pixels.
	pub label_size: f64,
	/// Label font size for highlighted nodes during hover.
	pub highlight_label_size: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 1000.0,
			height: 800.0,
			link_strength: 0.125,
			link_distance: 30.0,
			charge: -30.0,
			zoom_scale_range: (0.1, 8.0),
			link_opacity: 0.35,
			label_opacity: 0.35,
			fade_opacity: 0.1,
			transition_ms: 500.0,
			alpha_min: 0.001,
			velocity_decay: 0.6,
			drag_alpha_target: 0.3,
			label_size: 10.0,
			highlight_label_size: 12.0,
		}
	}
}
