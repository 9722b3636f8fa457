use crate::graph::{GraphModel, NodeIndex};

use super::{FilterCriteria, FilterPolicy, ScaleSelection, Visibility};

/// Keeps nodes of one scale at full strength and, with "show connected",
/// their direct neighbours dimmed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalePolicy;

impl FilterPolicy for ScalePolicy {
    fn node_visibility(
        &self,
        graph: &GraphModel,
        criteria: &FilterCriteria,
        node: NodeIndex,
    ) -> Visibility {
        let ScaleSelection::Only(scale) = &criteria.scale else {
            return Visibility::Full;
        };
        let in_scale = |index: NodeIndex| {
            graph
                .node(index)
                .and_then(|node| node.scale.as_deref())
                .is_some_and(|tag| tag == scale)
        };

        if in_scale(node) {
            Visibility::Full
        } else if criteria.show_connected
            && graph.neighbors(node).iter().any(|&neighbor| in_scale(neighbor))
        {
            Visibility::Dimmed
        } else {
            Visibility::Suppressed
        }
    }

    fn is_unrestricted(&self, _graph: &GraphModel, criteria: &FilterCriteria) -> bool {
        criteria.scale == ScaleSelection::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{RawEdge, RawNode};

    fn graph() -> GraphModel {
        GraphModel::build(
            vec![
                RawNode::new("a").with_scale("X"),
                RawNode::new("b").with_scale("Y"),
                RawNode::new("c").with_scale("X"),
                RawNode::new("d"),
            ],
            vec![RawEdge::new("a", "b"), RawEdge::new("b", "d")],
        )
    }

    #[test]
    fn matching_scale_is_full_and_others_suppressed() {
        let graph = graph();
        let criteria = FilterCriteria::scale("X", false);
        let tiers = graph
            .node_indices()
            .map(|node| ScalePolicy.node_visibility(&graph, &criteria, node))
            .collect::<Vec<_>>();

        assert_eq!(
            tiers,
            vec![
                Visibility::Full,
                Visibility::Suppressed,
                Visibility::Full,
                Visibility::Suppressed
            ]
        );
    }

    #[test]
    fn show_connected_dims_only_direct_neighbours() {
        let graph = graph();
        let criteria = FilterCriteria::scale("X", true);

        let b = graph.index_of("b").unwrap();
        let d = graph.index_of("d").unwrap();
        assert_eq!(ScalePolicy.node_visibility(&graph, &criteria, b), Visibility::Dimmed);
        assert_eq!(ScalePolicy.node_visibility(&graph, &criteria, d), Visibility::Suppressed);
    }

    #[test]
    fn all_scales_is_unrestricted() {
        let graph = graph();
        assert!(ScalePolicy.is_unrestricted(&graph, &FilterCriteria::all(&graph)));
        assert!(!ScalePolicy.is_unrestricted(&graph, &FilterCriteria::scale("Y", false)));
    }
}
