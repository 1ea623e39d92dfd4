use crate::ir::{BracketInput, Match, ParticipantRef};
use crate::layout::{LayoutError, Result};

/// Round label for a round holding `count` matches.
pub fn round_label(count: usize) -> String {
    match count {
        1 => "F".to_string(),
        2 => "SF".to_string(),
        4 => "QF".to_string(),
        _ => format!("R{}", count * 2),
    }
}

/// Builds a complete single-elimination bracket for `entrants` players.
///
/// Ids look like `QF-3`; first-round matches pair seed `i + 1` against seed
/// `entrants - i`.
pub fn single_elimination(entrants: usize) -> Result<BracketInput> {
    if entrants < 2 || !entrants.is_power_of_two() {
        return Err(LayoutError::BracketSize(entrants));
    }

    let mut rounds: Vec<Vec<String>> = Vec::new();
    let mut count = entrants / 2;
    while count >= 1 {
        let label = round_label(count);
        rounds.push((1..=count).map(|k| format!("{label}-{k}")).collect());
        count /= 2;
    }

    let mut matches = Vec::with_capacity(entrants - 1);
    for (r, ids) in rounds.iter().enumerate() {
        let next = rounds.get(r + 1);
        for (i, id) in ids.iter().enumerate() {
            let mut m = Match::new(id.clone(), next.map(|next| next[i / 2].as_str()));
            m.round_hint = id.split('-').next().map(str::to_string);
            if r == 0 {
                let left_seed = i + 1;
                let right_seed = ids.len() * 2 - i;
                m.left = Some(ParticipantRef::seeded(
                    format!("Team {left_seed}"),
                    left_seed as u32,
                ));
                m.right = Some(ParticipantRef::seeded(
                    format!("Team {right_seed}"),
                    right_seed as u32,
                ));
            }
            matches.push(m);
        }
    }

    Ok(BracketInput::new(matches))
}
