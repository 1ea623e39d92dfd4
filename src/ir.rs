use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type MatchId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub name: String,
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub school: Option<String>,
}

impl ParticipantRef {
    pub fn seeded(name: impl Into<String>, seed: u32) -> Self {
        Self {
            name: name.into(),
            seed: Some(seed),
            school: None,
        }
    }
}

/// A single match record. Only the two pointer fields affect layout and
/// partitioning; participants and the round hint are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    #[serde(default)]
    pub winner_next_match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_next_match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<ParticipantRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<ParticipantRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_hint: Option<String>,
}

impl Match {
    pub fn new(id: impl Into<String>, winner_next: Option<&str>) -> Self {
        Self {
            id: id.into(),
            winner_next_match_id: winner_next.map(str::to_string),
            loser_next_match_id: None,
            left: None,
            right: None,
            round_hint: None,
        }
    }

    /// A match whose winner advances to `parent`.
    pub fn feeding(id: impl Into<String>, parent: &str) -> Self {
        Self::new(id, Some(parent))
    }

    /// A terminal match (no winner destination).
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, None)
    }

    pub fn with_loser_next(mut self, target: &str) -> Self {
        self.loser_next_match_id = Some(target.to_string());
        self
    }

    pub fn is_root(&self) -> bool {
        self.winner_next_match_id.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketInput {
    pub matches: Vec<Match>,
}

impl BracketInput {
    pub fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Keeps the matches whose id is listed, in their original order.
    pub fn subset<S: AsRef<str>>(&self, ids: &[S]) -> BracketInput {
        let keep: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        BracketInput {
            matches: self
                .matches
                .iter()
                .filter(|m| keep.contains(m.id.as_str()))
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<Match>> for BracketInput {
    fn from(matches: Vec<Match>) -> Self {
        Self::new(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let raw = r#"{
            "id": "SF-1",
            "winnerNextMatchId": "F-1",
            "loserNextMatchId": "C-1",
            "left": { "name": "Team 1", "seed": 1 },
            "roundHint": "SF"
        }"#;
        let m: Match = serde_json::from_str(raw).unwrap();
        assert_eq!(m.winner_next_match_id.as_deref(), Some("F-1"));
        assert_eq!(m.loser_next_match_id.as_deref(), Some("C-1"));
        assert_eq!(m.left.as_ref().unwrap().seed, Some(1));
        assert!(m.right.is_none());
        assert_eq!(m.round_hint.as_deref(), Some("SF"));
    }

    #[test]
    fn missing_winner_pointer_is_root() {
        let m: Match = serde_json::from_str(r#"{ "id": "F" }"#).unwrap();
        assert!(m.is_root());
    }

    #[test]
    fn subset_preserves_input_order() {
        let input = BracketInput::new(vec![
            Match::feeding("M2", "F"),
            Match::feeding("M1", "F"),
            Match::root("F"),
            Match::root("X"),
        ]);
        let sub = input.subset(&["F", "M1", "M2"][..]);
        let ids: Vec<&str> = sub.matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["M2", "M1", "F"]);
    }
}
