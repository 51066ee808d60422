//! Interactive force-directed network graph component.
//!
//! Renders a network of entities and their relationships on an HTML canvas:
//! - Physics-based node positioning with alpha cooling and drag pinning
//! - Constant-time adjacency lookups driving hover highlighting
//! - Pan, zoom, and node dragging with consistent coordinate transforms
//!
//! The core (adjacency, simulation, viewport, interaction) is plain data and
//! logic behind the [`RenderBridge`] trait; the canvas drawing and leptos
//! wiring consume it.

mod adjacency;
mod bridge;
mod component;
mod config;
mod controller;
mod error;
mod highlight;
mod render;
mod simulation;
mod types;
mod viewport;

pub use adjacency::AdjacencyIndex;
pub use bridge::{Handle, RenderBridge};
pub use component::{NetworkGraphCanvas, Subscription};
pub use config::GraphConfig;
pub use controller::InteractionController;
pub use error::GraphLoadError;
pub use highlight::HighlightState;
pub use render::CanvasBridge;
pub use simulation::{ForceSimulation, Geometry, Phase, ResolvedLink, SimNode};
pub use types::{GraphData, GraphLink, GraphNode};
pub use viewport::{Transform, ViewportTransform};
