//! Iterative force-directed layout solver.
//!
//! Positions nodes under three forces applied in order each tick: link
//! attraction (springs toward a rest separation), pairwise many-body
//! repulsion, and a centering pull keeping the centroid at the canvas
//! center. A cooling scalar `alpha` decays multiplicatively toward
//! `alpha_target`; once it crosses the floor with no target set, the
//! simulation goes idle and stops emitting ticks until restarted.
//!
//! Repulsion is exact pairwise O(n²). That is the correct reference behavior
//! and fine for graphs up to a few hundred nodes; a quadtree approximation
//! is the upgrade path past that.

use std::f64::consts::PI;

use super::config::GraphConfig;
use super::error::GraphLoadError;
use super::types::{GraphLink, GraphNode};

/// Distance substituted for degenerate zero-length spans so force math never
/// divides by zero. Visual jitter from this is self-correcting.
const EPSILON: f64 = 1e-6;

/// Whether the solver is actively ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Ticks advance positions and decay alpha.
	Running,
	/// Cooled below the alpha floor; ticks are no-ops until restarted.
	Idle,
}

/// Mutable per-node simulation state.
#[derive(Clone, Debug)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned position. While set, integration snaps the node here and
	/// zeroes its velocity instead of moving it.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

impl SimNode {
	pub fn pinned(&self) -> bool {
		self.fx.is_some() && self.fy.is_some()
	}
}

/// A link with endpoints resolved to node indices.
#[derive(Clone, Debug)]
pub struct ResolvedLink {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	/// Degree bias: how much of the spring correction the target absorbs.
	/// A well-connected endpoint moves less than a leaf.
	bias: f64,
}

/// Plain geometry snapshot emitted after a tick, for the render bridge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
	pub nodes: Vec<(f64, f64)>,
	pub links: Vec<(f64, f64, f64, f64)>,
}

/// The layout solver. See the module docs for the tick algorithm.
#[derive(Debug)]
pub struct ForceSimulation {
	nodes: Vec<SimNode>,
	links: Vec<ResolvedLink>,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	link_strength: f64,
	link_distance: f64,
	charge: f64,
	center: (f64, f64),
	phase: Phase,
}

impl ForceSimulation {
	/// Build a simulation from graph data, resolving link endpoints to node
	/// indices. Fails fast on a link whose endpoint id is absent from the
	/// node set. Nodes start on a circle around the canvas center.
	pub fn new(
		nodes: &[GraphNode],
		links: &[GraphLink],
		config: &GraphConfig,
	) -> Result<Self, GraphLoadError> {
		let center = (config.width / 2.0, config.height / 2.0);
		let count = nodes.len().max(1);

		let sim_nodes = nodes
			.iter()
			.enumerate()
			.map(|(i, _)| {
				let angle = i as f64 * 2.0 * PI / count as f64;
				SimNode {
					x: center.0 + 100.0 * angle.cos(),
					y: center.1 + 100.0 * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					fx: None,
					fy: None,
				}
			})
			.collect();

		let index_of = |id: &str| nodes.iter().position(|n| n.id == id);
		let mut resolved = Vec::with_capacity(links.len());
		for link in links {
			let source = index_of(&link.source).ok_or_else(|| {
				GraphLoadError::UnknownEndpoint {
					link_source: link.source.clone(),
					link_target: link.target.clone(),
					missing: link.source.clone(),
				}
			})?;
			let target = index_of(&link.target).ok_or_else(|| {
				GraphLoadError::UnknownEndpoint {
					link_source: link.source.clone(),
					link_target: link.target.clone(),
					missing: link.target.clone(),
				}
			})?;
			resolved.push(ResolvedLink { source, target, bias: 0.5 });
		}

		// Degree bias, computed once endpoints are known.
		let mut degree = vec![0usize; nodes.len()];
		for link in &resolved {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		for link in &mut resolved {
			let (ds, dt) = (degree[link.source] as f64, degree[link.target] as f64);
			link.bias = ds / (ds + dt);
		}

		Ok(Self {
			nodes: sim_nodes,
			links: resolved,
			alpha: 1.0,
			alpha_min: config.alpha_min,
			alpha_decay: 1.0 - config.alpha_min.powf(1.0 / 300.0),
			alpha_target: 0.0,
			velocity_decay: config.velocity_decay,
			link_strength: config.link_strength,
			link_distance: config.link_distance,
			charge: config.charge,
			center,
			phase: Phase::Running,
		})
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[ResolvedLink] {
		&self.links
	}

	/// Force the cooling floor. A positive target keeps the layout warm for
	/// the duration of a drag; zero lets it settle again.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Resume ticking. Alpha climbs back toward `alpha_target` on the next
	/// tick, so restarting an idle simulation with a positive target reheats
	/// it rather than snapping.
	pub fn restart(&mut self) {
		self.phase = Phase::Running;
	}

	/// Pin a node: it snaps to `(x, y)` immediately and integration leaves
	/// it there until unpinned.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		let node = &mut self.nodes[index];
		node.fx = Some(x);
		node.fy = Some(y);
		node.x = x;
		node.y = y;
		node.vx = 0.0;
		node.vy = 0.0;
	}

	/// Release a pinned node back to free integration.
	pub fn unpin(&mut self, index: usize) {
		let node = &mut self.nodes[index];
		node.fx = None;
		node.fy = None;
	}

	/// Advance one step. Returns false without touching anything when idle.
	pub fn tick(&mut self) -> bool {
		if self.phase == Phase::Idle {
			return false;
		}

		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_link_force();
		self.apply_many_body();
		self.apply_centering();
		self.integrate();

		if self.alpha < self.alpha_min && self.alpha_target == 0.0 {
			self.phase = Phase::Idle;
		}
		true
	}

	/// Snapshot of current node positions and link endpoints.
	pub fn geometry(&self) -> Geometry {
		Geometry {
			nodes: self.nodes.iter().map(|n| (n.x, n.y)).collect(),
			links: self
				.links
				.iter()
				.map(|l| {
					let (s, t) = (&self.nodes[l.source], &self.nodes[l.target]);
					(s.x, s.y, t.x, t.y)
				})
				.collect(),
		}
	}

	/// Spring each link toward its rest separation. The correction is split
	/// between the endpoints by degree bias and scaled by alpha.
	fn apply_link_force(&mut self) {
		for link in &self.links {
			let s = &self.nodes[link.source];
			let t = &self.nodes[link.target];
			let mut dx = (t.x + t.vx) - (s.x + s.vx);
			let mut dy = (t.y + t.vy) - (s.y + s.vy);
			if dx == 0.0 && dy == 0.0 {
				dx = EPSILON;
				dy = EPSILON;
			}
			let len = (dx * dx + dy * dy).sqrt();
			let l = (len - self.link_distance) / len * self.alpha * self.link_strength;
			let (fx, fy) = (dx * l, dy * l);

			let target = &mut self.nodes[link.target];
			target.vx -= fx * link.bias;
			target.vy -= fy * link.bias;
			let source = &mut self.nodes[link.source];
			source.vx += fx * (1.0 - link.bias);
			source.vy += fy * (1.0 - link.bias);
		}
	}

	/// Exact pairwise repulsion, charge / d² along the separation vector.
	/// Very short spans are softened toward a minimum distance so coincident
	/// nodes push apart with a large but finite impulse.
	fn apply_many_body(&mut self) {
		const DISTANCE_MIN2: f64 = 1.0;
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = EPSILON;
					dy = EPSILON;
				}
				let mut d2 = dx * dx + dy * dy;
				if d2 < DISTANCE_MIN2 {
					d2 = (DISTANCE_MIN2 * d2).sqrt();
				}
				let w = self.charge * self.alpha / d2;
				self.nodes[i].vx += dx * w;
				self.nodes[i].vy += dy * w;
				self.nodes[j].vx -= dx * w;
				self.nodes[j].vy -= dy * w;
			}
		}
	}

	/// Translate all nodes so the centroid sits at the canvas center.
	/// Pinned nodes shift too, but integration snaps them back.
	fn apply_centering(&mut self) {
		let n = self.nodes.len();
		if n == 0 {
			return;
		}
		let (mut sx, mut sy) = (0.0, 0.0);
		for node in &self.nodes {
			sx += node.x;
			sy += node.y;
		}
		let (dx, dy) = (sx / n as f64 - self.center.0, sy / n as f64 - self.center.1);
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn integrate(&mut self) {
		for node in &mut self.nodes {
			if let (Some(fx), Some(fy)) = (node.fx, node.fy) {
				node.x = fx;
				node.y = fy;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= self.velocity_decay;
				node.vy *= self.velocity_decay;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			value: 10.0,
			categories: String::new(),
			label: None,
			title: None,
			image: None,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			value: 1.0,
		}
	}

	fn simple_sim() -> ForceSimulation {
		ForceSimulation::new(
			&[node("a"), node("b"), node("c")],
			&[link("a", "b"), link("b", "c")],
			&GraphConfig::default(),
		)
		.unwrap()
	}

	#[test]
	fn dangling_endpoint_fails_load() {
		let err = ForceSimulation::new(
			&[node("a")],
			&[link("x", "a")],
			&GraphConfig::default(),
		)
		.unwrap_err();
		let GraphLoadError::UnknownEndpoint { missing, .. } = err;
		assert_eq!(missing, "x");
	}

	#[test]
	fn alpha_decays_monotonically_without_target() {
		let mut sim = simple_sim();
		let mut previous = sim.alpha();
		for _ in 0..50 {
			sim.tick();
			assert!(sim.alpha() <= previous);
			previous = sim.alpha();
		}
	}

	#[test]
	fn cools_to_idle_and_stops_emitting() {
		let mut sim = simple_sim();
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000, "simulation never went idle");
		}
		assert_eq!(sim.phase(), Phase::Idle);
		assert!(sim.alpha() < GraphConfig::default().alpha_min);
		assert!(!sim.tick());
		assert!(!sim.tick());
	}

	#[test]
	fn restart_with_target_reheats_idle_simulation() {
		let mut sim = simple_sim();
		while sim.tick() {}

		sim.set_alpha_target(0.3);
		sim.restart();
		assert!(sim.tick());
		assert!(sim.alpha() > GraphConfig::default().alpha_min);

		// Releasing the target lets it cool back to idle.
		sim.set_alpha_target(0.0);
		while sim.tick() {}
		assert_eq!(sim.phase(), Phase::Idle);
	}

	#[test]
	fn pinned_node_holds_position_through_ticks() {
		let mut sim = simple_sim();
		sim.pin(0, 100.0, 100.0);
		assert_eq!((sim.nodes()[0].x, sim.nodes()[0].y), (100.0, 100.0));
		for _ in 0..10 {
			sim.tick();
			assert_eq!((sim.nodes()[0].x, sim.nodes()[0].y), (100.0, 100.0));
			assert_eq!((sim.nodes()[0].vx, sim.nodes()[0].vy), (0.0, 0.0));
		}
	}

	#[test]
	fn unpinned_node_drifts_under_forces() {
		let mut sim = simple_sim();
		sim.set_alpha_target(0.3);
		sim.pin(0, 100.0, 100.0);
		sim.tick();
		sim.set_alpha_target(0.0);
		sim.unpin(0);
		assert!(!sim.nodes()[0].pinned());
		for _ in 0..20 {
			sim.tick();
		}
		let n = &sim.nodes()[0];
		assert!(
			(n.x - 100.0).abs() > 1e-3 || (n.y - 100.0).abs() > 1e-3,
			"released node should move again"
		);
	}

	#[test]
	fn self_link_does_not_break_the_integrator() {
		let mut sim = ForceSimulation::new(
			&[node("a"), node("b")],
			&[link("a", "a"), link("a", "b")],
			&GraphConfig::default(),
		)
		.unwrap();
		for _ in 0..100 {
			sim.tick();
		}
		for n in sim.nodes() {
			assert!(n.x.is_finite() && n.y.is_finite());
		}
	}

	#[test]
	fn coincident_nodes_separate() {
		let mut sim = ForceSimulation::new(
			&[node("a"), node("b")],
			&[],
			&GraphConfig::default(),
		)
		.unwrap();
		// Force both nodes onto the same point.
		sim.pin(0, 500.0, 400.0);
		sim.pin(1, 500.0, 400.0);
		sim.tick();
		sim.unpin(0);
		sim.unpin(1);
		for _ in 0..50 {
			sim.tick();
		}
		let (a, b) = (&sim.nodes()[0], &sim.nodes()[1]);
		let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		assert!(dist.is_finite());
		assert!(dist > 1.0, "repulsion should push coincident nodes apart");
	}

	#[test]
	fn isolated_node_converges_near_center() {
		let mut sim = ForceSimulation::new(
			&[node("only")],
			&[],
			&GraphConfig::default(),
		)
		.unwrap();
		while sim.tick() {}
		let n = &sim.nodes()[0];
		let config = GraphConfig::default();
		assert!((n.x - config.width / 2.0).abs() < 1.0);
		assert!((n.y - config.height / 2.0).abs() < 1.0);
	}

	#[test]
	fn empty_graph_ticks_without_panicking() {
		let mut sim =
			ForceSimulation::new(&[], &[], &GraphConfig::default()).unwrap();
		sim.tick();
		assert!(sim.geometry().nodes.is_empty());
	}

	#[test]
	fn geometry_snapshot_matches_link_endpoints() {
		let sim = simple_sim();
		let geometry = sim.geometry();
		assert_eq!(geometry.nodes.len(), 3);
		assert_eq!(geometry.links.len(), 2);
		let (x1, y1, ..) = geometry.links[0];
		assert_eq!((x1, y1), geometry.nodes[0]);
	}
}
