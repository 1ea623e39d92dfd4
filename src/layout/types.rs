use serde::{Deserialize, Serialize};

use crate::ir::MatchId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: MatchId,
    pub x: f64,
    /// May be fractional: interior matches sit at the midpoint of their children.
    pub y: f64,
    /// 0 is the earliest round; the final has the highest round.
    pub round: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Winner,
    Loser,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub from: MatchId,
    pub to: MatchId,
    pub kind: EdgeKind,
}

impl LayoutEdge {
    pub fn winner(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            kind: EdgeKind::Winner,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Match ids per round, earliest round first.
    pub rounds: Vec<Vec<MatchId>>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.rounds.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn min_round(&self) -> Option<usize> {
        self.nodes.iter().map(|node| node.round).min()
    }

    pub fn max_round(&self) -> Option<usize> {
        self.nodes.iter().map(|node| node.round).max()
    }

    /// Bottom-right extent of the node anchors, `(0, 0)` when empty.
    pub fn extent(&self) -> (f64, f64) {
        self.nodes.iter().fold((0.0_f64, 0.0_f64), |(w, h), node| {
            (w.max(node.x), h.max(node.y))
        })
    }
}
