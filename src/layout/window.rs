use std::collections::HashSet;

use super::types::{Layout, LayoutEdge, LayoutNode};

/// Restricts a layout to the rounds in `[start_round, end_round)`.
///
/// The range is clamped to the rounds actually present; an empty range after
/// clamping gives an empty layout. Coordinates and round numbers are kept as
/// they were. Nodes come back ordered by id, edges by `(from, to)`. Round
/// buckets are indexed the same way as `LayoutNode::round`.
pub fn window_layout(layout: &Layout, start_round: usize, end_round: usize) -> Layout {
    let (Some(min_round), Some(max_round)) = (layout.min_round(), layout.max_round()) else {
        return Layout::default();
    };
    let start = start_round.max(min_round);
    let end = end_round.min(max_round + 1);
    if start >= end {
        tracing::debug!(start_round, end_round, "empty round window");
        return Layout::default();
    }
    let in_window = |round: usize| (start..end).contains(&round);

    let mut nodes: Vec<LayoutNode> = layout
        .nodes
        .iter()
        .filter(|node| in_window(node.round))
        .cloned()
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let kept: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

    let mut edges: Vec<LayoutEdge> = layout
        .edges
        .iter()
        .filter(|edge| kept.contains(edge.from.as_str()) && kept.contains(edge.to.as_str()))
        .cloned()
        .collect();
    edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));

    let rounds: Vec<Vec<String>> = layout
        .rounds
        .iter()
        .enumerate()
        .filter(|(round, _)| in_window(*round))
        .map(|(_, bucket)| {
            bucket
                .iter()
                .filter(|id| kept.contains(id.as_str()))
                .cloned()
                .collect()
        })
        .collect();

    tracing::debug!(
        start,
        end,
        nodes = nodes.len(),
        edges = edges.len(),
        "windowed layout"
    );

    Layout {
        nodes,
        edges,
        rounds,
    }
}
