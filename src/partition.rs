use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::ir::{BracketInput, Match, MatchId};

/// A connected component under winner pointers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerTree {
    pub root_id: MatchId,
    /// Member ids, sorted.
    pub matches: Vec<MatchId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionResult {
    pub champion: Option<WinnerTree>,
    /// Sorted by root id.
    pub consolation: Vec<WinnerTree>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionSummary {
    pub champion_root: Option<MatchId>,
    pub champion_size: usize,
    pub consolation_roots: Vec<MatchId>,
}

impl PartitionResult {
    /// Champion first, then consolation trees.
    pub fn trees(&self) -> impl Iterator<Item = &WinnerTree> {
        self.champion.iter().chain(self.consolation.iter())
    }

    pub fn summary(&self) -> PartitionSummary {
        PartitionSummary {
            champion_root: self.champion.as_ref().map(|t| t.root_id.clone()),
            champion_size: self.champion.as_ref().map_or(0, |t| t.matches.len()),
            consolation_roots: self.consolation.iter().map(|t| t.root_id.clone()).collect(),
        }
    }
}

/// How an upward walk along winner pointers ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkEnd<'a> {
    /// Reached a match with no winner destination.
    Root(&'a str),
    /// Reached a match whose winner destination is not in the input.
    Dangling(&'a str),
    /// Came back to a match already on the walk; holds the smallest id seen.
    Cycle(&'a str),
    /// Ran into a match whose root was already resolved.
    Known(&'a str),
}

impl<'a> WalkEnd<'a> {
    fn root(self) -> &'a str {
        match self {
            WalkEnd::Root(id) | WalkEnd::Dangling(id) | WalkEnd::Cycle(id) | WalkEnd::Known(id) => {
                id
            }
        }
    }
}

struct RootResolver<'a> {
    by_id: &'a HashMap<&'a str, &'a Match>,
    memo: HashMap<&'a str, &'a str>,
}

impl<'a> RootResolver<'a> {
    fn new(by_id: &'a HashMap<&'a str, &'a Match>) -> Self {
        Self {
            by_id,
            memo: HashMap::with_capacity(by_id.len()),
        }
    }

    fn resolve(&mut self, start: &'a str) -> &'a str {
        if let Some(&root) = self.memo.get(start) {
            return root;
        }
        let by_id = self.by_id;

        let mut walk: Vec<&'a str> = Vec::new();
        let mut on_walk: HashSet<&'a str> = HashSet::new();
        let mut cur = start;
        let end = loop {
            if let Some(&root) = self.memo.get(cur) {
                break WalkEnd::Known(root);
            }
            if !on_walk.insert(cur) {
                let smallest = walk.iter().copied().min().unwrap_or(cur);
                tracing::trace!(start, root = smallest, "winner pointers form a cycle");
                break WalkEnd::Cycle(smallest);
            }
            walk.push(cur);

            let Some(m) = by_id.get(cur) else {
                break WalkEnd::Dangling(cur);
            };
            match m.winner_next_match_id.as_deref() {
                None => break WalkEnd::Root(cur),
                Some(next) if by_id.contains_key(next) => cur = next,
                Some(next) => {
                    tracing::trace!(id = cur, parent = next, "winner destination not found");
                    break WalkEnd::Dangling(cur);
                }
            }
        };

        let root = end.root();
        for id in walk {
            self.memo.insert(id, root);
        }
        root
    }
}

/// Splits matches into disjoint winner trees and picks the championship tree.
///
/// Never fails: duplicate ids keep their first record, a winner pointer to an
/// unknown id makes that match a root, and a cycle is rooted at the smallest
/// id on the walk that found it. Matches with no winner pointer that nothing
/// feeds into are ignored.
///
/// Tree membership never depends on input order. A cyclic tree's root id
/// does: the first walk to reach the cycle may start on a lead-in, and that
/// lead-in's id counts toward the smallest id. The root is always a member no
/// greater than the smallest id on the cycle itself.
///
/// The champion is the first tree (by root id) whose root is a real final and
/// none of whose matches receive a loser; failing that, the first tree with a
/// real final; failing that, the first tree.
pub fn partition_by_winner_trees(input: &BracketInput) -> PartitionResult {
    if input.is_empty() {
        return PartitionResult::default();
    }

    let mut by_id: HashMap<&str, &Match> = HashMap::with_capacity(input.matches.len());
    let mut ids: Vec<&str> = Vec::with_capacity(input.matches.len());
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    let mut loser_targets: HashSet<&str> = HashSet::new();
    for m in &input.matches {
        if !by_id.contains_key(m.id.as_str()) {
            by_id.insert(m.id.as_str(), m);
            ids.push(m.id.as_str());
        }
        if let Some(next) = m.winner_next_match_id.as_deref() {
            *incoming.entry(next).or_default() += 1;
        }
        if let Some(target) = m.loser_next_match_id.as_deref() {
            loser_targets.insert(target);
        }
    }

    let mut resolver = RootResolver::new(&by_id);
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for id in ids {
        let root = resolver.resolve(id);
        groups.entry(root).or_default().push(id);
    }

    let is_final = |id: &str| by_id.get(id).is_none_or(|m| m.is_root());

    let mut trees: Vec<WinnerTree> = Vec::with_capacity(groups.len());
    for (root, mut members) in groups {
        if let [only] = members.as_slice() {
            let fed = incoming.get(only).copied().unwrap_or(0) > 0;
            if !fed && is_final(*only) {
                continue;
            }
        }
        members.sort_unstable();
        trees.push(WinnerTree {
            root_id: root.to_string(),
            matches: members.into_iter().map(str::to_string).collect(),
        });
    }

    let receives_losers =
        |tree: &WinnerTree| tree.matches.iter().any(|id| loser_targets.contains(id.as_str()));
    let champion_index = trees
        .iter()
        .position(|t| is_final(t.root_id.as_str()) && !receives_losers(t))
        .or_else(|| trees.iter().position(|t| is_final(t.root_id.as_str())))
        .or((!trees.is_empty()).then_some(0));
    let champion = champion_index.map(|idx| trees.remove(idx));

    tracing::debug!(
        matches = input.matches.len(),
        champion = champion.as_ref().map(|t| t.root_id.as_str()),
        consolation = trees.len(),
        "partitioned winner trees"
    );

    PartitionResult {
        champion,
        consolation: trees,
    }
}

/// The matches of the championship tree, in input order. Empty when the
/// input has no champion tree.
pub fn champion_input(input: &BracketInput) -> BracketInput {
    match partition_by_winner_trees(input).champion {
        Some(tree) => {
            tracing::debug!(root = %tree.root_id, size = tree.matches.len(), "using champion tree");
            input.subset(tree.matches.as_slice())
        }
        None => {
            tracing::warn!("no champion tree found");
            BracketInput::default()
        }
    }
}
