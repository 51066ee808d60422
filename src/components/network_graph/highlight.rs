//! Transient hover-highlight state.
//!
//! Recomputed from scratch on every hover event; nothing carries over
//! between hover sessions. Node highlighting follows the adjacency index
//! (symmetric, self-inclusive), while link emphasis requires direct
//! incidence to the focused node. The two deliberately differ: hovering
//! shows every connected node but only directly-touching links.

use super::adjacency::AdjacencyIndex;

/// Per-node and per-link highlight flags for the current hover session.
///
/// Neutral state (no focus) reports everything visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightState {
	focus: Option<usize>,
	node_connected: Vec<bool>,
	link_incident: Vec<bool>,
}

impl HighlightState {
	/// Recompute flags for a hover on the node at `focus`.
	///
	/// `ids` are node ids in simulation order; `links` are resolved link
	/// endpoint index pairs in link order.
	pub fn set_focus(
		&mut self,
		focus: usize,
		ids: &[&str],
		links: &[(usize, usize)],
		adjacency: &AdjacencyIndex,
	) {
		self.focus = Some(focus);
		self.node_connected = ids
			.iter()
			.map(|id| adjacency.is_connected(id, ids[focus]))
			.collect();
		self.link_incident = links
			.iter()
			.map(|&(source, target)| source == focus || target == focus)
			.collect();
	}

	/// Reset to the neutral all-visible state (hover-out).
	pub fn clear(&mut self) {
		self.focus = None;
		self.node_connected.clear();
		self.link_incident.clear();
	}

	pub fn focus(&self) -> Option<usize> {
		self.focus
	}

	/// Whether the node at `index` is highlighted. Always true when nothing
	/// is focused.
	pub fn node_connected(&self, index: usize) -> bool {
		match self.focus {
			Some(_) => self.node_connected.get(index).copied().unwrap_or(false),
			None => true,
		}
	}

	/// Whether the link at `index` directly touches the focused node.
	pub fn link_incident(&self, index: usize) -> bool {
		match self.focus {
			Some(_) => self.link_incident.get(index).copied().unwrap_or(false),
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::GraphLink;

	fn chain_index() -> AdjacencyIndex {
		// a -> b -> c
		AdjacencyIndex::build(&[
			GraphLink { source: "a".into(), target: "b".into(), value: 1.0 },
			GraphLink { source: "b".into(), target: "c".into(), value: 1.0 },
		])
	}

	#[test]
	fn focus_marks_connected_nodes_and_incident_links() {
		let mut state = HighlightState::default();
		state.set_focus(0, &["a", "b", "c"], &[(0, 1), (1, 2)], &chain_index());

		assert!(state.node_connected(0)); // self
		assert!(state.node_connected(1)); // direct neighbor
		assert!(!state.node_connected(2)); // two hops away
		assert!(state.link_incident(0)); // a-b touches a
		assert!(!state.link_incident(1)); // b-c does not
	}

	#[test]
	fn clear_restores_neutral_visibility() {
		let mut state = HighlightState::default();
		state.set_focus(0, &["a", "b", "c"], &[(0, 1), (1, 2)], &chain_index());
		state.clear();

		assert_eq!(state.focus(), None);
		assert!(state.node_connected(2));
		assert!(!state.link_incident(0));
	}

	#[test]
	fn refocus_after_clear_is_identical() {
		let index = chain_index();
		let ids = ["a", "b", "c"];
		let links = [(0, 1), (1, 2)];

		let mut first = HighlightState::default();
		first.set_focus(1, &ids, &links, &index);
		let snapshot = first.clone();

		first.clear();
		first.set_focus(1, &ids, &links, &index);
		assert_eq!(first, snapshot);
	}
}
