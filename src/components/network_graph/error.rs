//! Load-time errors surfaced before the simulation starts.

use thiserror::Error;

/// Failure while turning raw graph data into a runnable simulation.
///
/// A dangling link endpoint is fatal at load time: resolving it later would
/// corrupt force computation, so it is never silently dropped.
#[derive(Debug, Error)]
pub enum GraphLoadError {
	/// A link references a node id that is absent from the node set.
	#[error("link {link_source:?} -> {link_target:?} references unknown node {missing:?}")]
	UnknownEndpoint {
		link_source: String,
		link_target: String,
		missing: String,
	},
}
