//! Zoom/pan transform between simulation space and screen space.
//!
//! The transform applies uniformly to rendered geometry only; simulation
//! coordinates are never scaled or translated by it.

/// A concrete scale + translation, as handed to the render bridge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	pub scale: f64,
	pub tx: f64,
	pub ty: f64,
}

impl Default for Transform {
	fn default() -> Self {
		Self { scale: 1.0, tx: 0.0, ty: 0.0 }
	}
}

/// Tracks the current zoom scale (clamped to a configured range) and pan
/// offset, and maps screen coordinates back into simulation space.
#[derive(Clone, Debug)]
pub struct ViewportTransform {
	transform: Transform,
	scale_range: (f64, f64),
}

impl ViewportTransform {
	pub fn new(scale_range: (f64, f64)) -> Self {
		Self { transform: Transform::default(), scale_range }
	}

	pub fn current(&self) -> Transform {
		self.transform
	}

	/// Set an absolute zoom scale, keeping `focal` (screen coordinates)
	/// fixed in place. Out-of-range scales clamp to the configured range.
	pub fn zoom_to(&mut self, scale: f64, focal: (f64, f64)) {
		let clamped = scale.clamp(self.scale_range.0, self.scale_range.1);
		let ratio = clamped / self.transform.scale;
		self.transform.tx = focal.0 - (focal.0 - self.transform.tx) * ratio;
		self.transform.ty = focal.1 - (focal.1 - self.transform.ty) * ratio;
		self.transform.scale = clamped;
	}

	/// Multiply the current scale, anchored at `focal`. This is the wheel
	/// gesture.
	pub fn zoom_by(&mut self, factor: f64, focal: (f64, f64)) {
		self.zoom_to(self.transform.scale * factor, focal);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.transform.tx += dx;
		self.transform.ty += dy;
	}

	/// Inverse mapping, used for hit tests and drag coordinates.
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.tx) / self.transform.scale,
			(sy - self.transform.ty) / self.transform.scale,
		)
	}
}
