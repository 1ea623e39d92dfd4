mod error;
pub(crate) mod types;
mod window;
pub use error::*;
pub use types::*;
pub use window::*;

use crate::config::LayoutConfig;
use crate::ir::BracketInput;
use std::collections::{HashMap, HashSet};

/// Lays out a single-elimination winner tree.
///
/// The input must contain exactly one match without a winner destination (the
/// final) and no duplicate ids. Leaves take consecutive rows in depth-first
/// order (children visited by ascending id); every other match sits at the
/// midpoint of its outermost children. Rounds count up from the deepest leaf,
/// so the final always lands in the last round. Matches whose winner pointer
/// names an unknown id cannot be reached from the final and are left out.
///
/// The result depends only on ids and tree shape, never on the order of
/// `input.matches`.
pub fn build_layout(input: &BracketInput, config: &LayoutConfig) -> Result<Layout> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(input.matches.len());
    for m in &input.matches {
        if !seen.insert(m.id.as_str()) {
            return Err(LayoutError::DuplicateMatchId(m.id.clone()));
        }
    }
    if input.is_empty() {
        return Ok(Layout::default());
    }

    let roots: Vec<&str> = input
        .matches
        .iter()
        .filter(|m| m.is_root())
        .map(|m| m.id.as_str())
        .collect();
    let [root] = roots.as_slice() else {
        return Err(LayoutError::RootCount(roots.len()));
    };

    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for m in &input.matches {
        if let Some(parent) = m.winner_next_match_id.as_deref() {
            children.entry(parent).or_default().push(m.id.as_str());
        }
    }
    for kids in children.values_mut() {
        kids.sort_unstable();
    }

    let mut traversal = Traversal::new(&children);
    traversal.visit(*root, 0);
    let Traversal {
        depths,
        rows,
        edges,
        ..
    } = traversal;

    let max_depth = depths.values().copied().max().unwrap_or(0);
    let mut nodes: Vec<LayoutNode> = depths
        .iter()
        .map(|(id, depth)| {
            let round = max_depth - depth;
            let row = rows.get(id).copied().unwrap_or(0.0);
            LayoutNode {
                id: id.to_string(),
                x: round as f64 * config.h_gap,
                y: row * config.v_gap,
                round,
            }
        })
        .collect();
    nodes.sort_by(|a, b| {
        a.round
            .cmp(&b.round)
            .then(a.y.total_cmp(&b.y))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut rounds: Vec<Vec<String>> = vec![Vec::new(); max_depth + 1];
    for node in &nodes {
        rounds[node.round].push(node.id.clone());
    }

    let unreachable = input.matches.len() - nodes.len();
    if unreachable > 0 {
        tracing::debug!(unreachable, "matches not reachable from the final were skipped");
    }
    tracing::debug!(
        root = *root,
        nodes = nodes.len(),
        edges = edges.len(),
        rounds = rounds.len(),
        "built bracket layout"
    );

    Ok(Layout {
        nodes,
        edges,
        rounds,
    })
}

/// Post-order walk state. `next_leaf_row` is shared by the whole walk, so
/// leaves are numbered in the order they are first reached.
struct Traversal<'a> {
    children: &'a HashMap<&'a str, Vec<&'a str>>,
    depths: HashMap<&'a str, usize>,
    rows: HashMap<&'a str, f64>,
    edges: Vec<LayoutEdge>,
    next_leaf_row: usize,
}

impl<'a> Traversal<'a> {
    fn new(children: &'a HashMap<&'a str, Vec<&'a str>>) -> Self {
        Self {
            children,
            depths: HashMap::new(),
            rows: HashMap::new(),
            edges: Vec::new(),
            next_leaf_row: 0,
        }
    }

    fn visit(&mut self, id: &'a str, depth: usize) -> f64 {
        self.depths.insert(id, depth);

        let children = self.children;
        let kids = match children.get(id) {
            Some(kids) if !kids.is_empty() => kids,
            _ => {
                let row = self.next_leaf_row as f64;
                self.next_leaf_row += 1;
                self.rows.insert(id, row);
                return row;
            }
        };

        let mut min_row = f64::INFINITY;
        let mut max_row = f64::NEG_INFINITY;
        for &child in kids {
            self.edges.push(LayoutEdge::winner(child, id));
            let row = self.visit(child, depth + 1);
            min_row = min_row.min(row);
            max_row = max_row.max(row);
        }

        let row = (min_row + max_row) / 2.0;
        self.rows.insert(id, row);
        row
    }
}
