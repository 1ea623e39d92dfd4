use crate::ir::{BracketInput, Match, ParticipantRef};
use crate::layout::{EdgeKind, Layout};
use crate::partition::{PartitionResult, PartitionSummary, WinnerTree};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub round_count: usize,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub rounds: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub round: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<ParticipantRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<ParticipantRef>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Serialize)]
pub struct PartitionDump {
    pub summary: PartitionSummary,
    pub champion: Option<WinnerTree>,
    pub consolation: Vec<WinnerTree>,
}

impl LayoutDump {
    /// Joins layout geometry with the display fields of the matches it came
    /// from. Matches missing from `input` are dumped without display fields.
    pub fn from_layout(layout: &Layout, input: &BracketInput) -> Self {
        let mut by_id: HashMap<&str, &Match> = HashMap::with_capacity(input.matches.len());
        for m in &input.matches {
            by_id.entry(m.id.as_str()).or_insert(m);
        }

        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let source = by_id.get(node.id.as_str());
                NodeDump {
                    id: node.id.clone(),
                    x: node.x,
                    y: node.y,
                    round: node.round,
                    round_hint: source.and_then(|m| m.round_hint.clone()),
                    left: source.and_then(|m| m.left.clone()),
                    right: source.and_then(|m| m.right.clone()),
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                kind: edge.kind,
            })
            .collect();

        let (width, height) = layout.extent();
        LayoutDump {
            width,
            height,
            round_count: layout.rounds.len(),
            nodes,
            edges,
            rounds: layout.rounds.clone(),
        }
    }
}

impl PartitionDump {
    pub fn from_partition(result: &PartitionResult) -> Self {
        PartitionDump {
            summary: result.summary(),
            champion: result.champion.clone(),
            consolation: result.consolation.clone(),
        }
    }
}

/// Writes `value` as JSON to `output`, or stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_to(&mut writer, value, pretty)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_to(&mut writer, value, pretty)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_to<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

pub fn write_layout_dump(
    path: Option<&Path>,
    layout: &Layout,
    input: &BracketInput,
    pretty: bool,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, input);
    write_json(&dump, path, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::generate::single_elimination;
    use crate::layout::build_layout;
    use crate::partition::partition_by_winner_trees;

    #[test]
    fn dump_carries_display_fields() {
        let input = single_elimination(4).unwrap();
        let layout = build_layout(&input, &LayoutConfig::default()).unwrap();
        let dump = LayoutDump::from_layout(&layout, &input);

        assert_eq!(dump.round_count, 2);
        assert_eq!(dump.nodes.len(), 3);
        assert_eq!((dump.width, dump.height), (160.0, 80.0));

        let sf1 = dump.nodes.iter().find(|n| n.id == "SF-1").unwrap();
        assert_eq!(sf1.round_hint.as_deref(), Some("SF"));
        assert_eq!(sf1.left.as_ref().unwrap().name, "Team 1");
        assert_eq!(sf1.right.as_ref().unwrap().name, "Team 4");
    }

    #[test]
    fn dump_serializes_camel_case() {
        let input = single_elimination(2).unwrap();
        let layout = build_layout(&input, &LayoutConfig::default()).unwrap();
        let json = serde_json::to_value(LayoutDump::from_layout(&layout, &input)).unwrap();
        assert_eq!(json["roundCount"], 1);
        assert_eq!(json["nodes"][0]["roundHint"], "F");
        assert!(json["edges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn partition_dump_includes_summary() {
        let input = single_elimination(8).unwrap();
        let dump = PartitionDump::from_partition(&partition_by_winner_trees(&input));
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["summary"]["championRoot"], "F-1");
        assert_eq!(json["summary"]["championSize"], 7);
        assert_eq!(json["champion"]["rootId"], "F-1");
    }
}
