use crate::graph::{GraphModel, NodeIndex};

use super::{FilterCriteria, FilterPolicy, Visibility};

/// Shows nodes whose category is active. There is no dimmed tier.
#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryPolicy;

impl FilterPolicy for CategoryPolicy {
    fn node_visibility(
        &self,
        graph: &GraphModel,
        criteria: &FilterCriteria,
        node: NodeIndex,
    ) -> Visibility {
        let active = graph
            .node(node)
            .is_some_and(|node| criteria.categories.contains(node.category_or_uncategorized()));
        if active {
            Visibility::Full
        } else {
            Visibility::Suppressed
        }
    }

    fn is_unrestricted(&self, graph: &GraphModel, criteria: &FilterCriteria) -> bool {
        graph
            .categories()
            .iter()
            .all(|category| criteria.categories.contains(category))
    }
}
