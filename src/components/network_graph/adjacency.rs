//! Constant-time "are these two nodes connected" lookups.
//!
//! Built once from the raw link list before id resolution, then read-only.
//! The index records link direction internally but answers queries
//! symmetrically, and treats every node as connected to itself.

use std::collections::{HashMap, HashSet};

use super::types::GraphLink;

/// Pair-keyed adjacency lookup over node ids.
///
/// Queries are pure lookups: an id that never appeared in a link simply
/// matches nothing. Validating ids against the node set is the simulation's
/// job, not this index's.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
	forward: HashMap<String, HashSet<String>>,
}

impl AdjacencyIndex {
	/// Scan the link list once and record each source -> target pair.
	pub fn build(links: &[GraphLink]) -> Self {
		let mut forward: HashMap<String, HashSet<String>> = HashMap::new();
		for link in links {
			forward
				.entry(link.source.clone())
				.or_default()
				.insert(link.target.clone());
		}
		Self { forward }
	}

	fn linked_as_source(&self, a: &str, b: &str) -> bool {
		self.forward.get(a).is_some_and(|targets| targets.contains(b))
	}

	/// True if `a` and `b` are directly linked in either direction, or equal.
	pub fn is_connected(&self, a: &str, b: &str) -> bool {
		a == b || self.linked_as_source(a, b) || self.linked_as_source(b, a)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			value: 1.0,
		}
	}

	#[test]
	fn direct_links_match_both_directions() {
		let index = AdjacencyIndex::build(&[link("a", "b")]);
		assert!(index.is_connected("a", "b"));
		assert!(index.is_connected("b", "a"));
	}

	#[test]
	fn self_connection_holds_without_links() {
		let index = AdjacencyIndex::build(&[]);
		assert!(index.is_connected("lonely", "lonely"));
	}

	#[test]
	fn unrelated_nodes_are_not_connected() {
		let index = AdjacencyIndex::build(&[link("a", "b"), link("b", "c")]);
		assert!(!index.is_connected("a", "c"));
	}

	#[test]
	fn unknown_ids_never_match() {
		let index = AdjacencyIndex::build(&[link("a", "b")]);
		assert!(!index.is_connected("a", "ghost"));
		assert!(!index.is_connected("ghost", "b"));
	}

	proptest! {
		#[test]
		fn query_is_symmetric(
			links in proptest::collection::vec(("[a-e]", "[a-e]"), 0..20),
			a in "[a-f]",
			b in "[a-f]",
		) {
			let links: Vec<GraphLink> =
				links.iter().map(|(s, t)| link(s, t)).collect();
			let index = AdjacencyIndex::build(&links);
			prop_assert_eq!(index.is_connected(&a, &b), index.is_connected(&b, &a));
			prop_assert!(index.is_connected(&a, &a));
		}
	}
}
