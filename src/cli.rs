use crate::config::load_config;
use crate::generate::single_elimination;
use crate::layout::{Layout, build_layout, window_layout};
use crate::layout_dump::{PartitionDump, write_json, write_layout_dump};
use crate::parser::parse_bracket;
use crate::partition::{champion_input, partition_by_winner_trees};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bkl",
    version,
    about = "Lay out single-elimination brackets and split mixed brackets into winner trees"
)]
pub struct Args {
    /// Input bracket (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "generate")]
    pub input: Option<PathBuf>,

    /// Generate a complete bracket for this many entrants instead of reading input
    #[arg(short = 'g', long = "generate")]
    pub generate: Option<usize>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "layout")]
    pub output_format: OutputFormat,

    /// Config JSON file (hGap, vGap, pretty)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Horizontal gap between rounds
    #[arg(long = "hGap")]
    pub h_gap: Option<f64>,

    /// Vertical gap between rows
    #[arg(long = "vGap")]
    pub v_gap: Option<f64>,

    /// Lay out only the championship tree
    #[arg(long = "champion")]
    pub champion: bool,

    /// First round to keep (inclusive)
    #[arg(long = "startRound")]
    pub start_round: Option<usize>,

    /// Round to stop before (exclusive)
    #[arg(long = "endRound")]
    pub end_round: Option<usize>,

    /// Single-line JSON
    #[arg(long = "compact")]
    pub compact: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Node coordinates, edges and rounds
    Layout,
    /// Champion and consolation winner trees
    Partition,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(h_gap) = args.h_gap {
        config.layout.h_gap = h_gap;
    }
    if let Some(v_gap) = args.v_gap {
        config.layout.v_gap = v_gap;
    }
    if args.compact {
        config.output.pretty = false;
    }

    let input = match args.generate {
        Some(entrants) => single_elimination(entrants)?,
        None => parse_bracket(&read_input(args.input.as_deref())?)?,
    };

    match args.output_format {
        OutputFormat::Partition => {
            let partition = partition_by_winner_trees(&input);
            let dump = PartitionDump::from_partition(&partition);
            write_json(&dump, args.output.as_deref(), config.output.pretty)?;
        }
        OutputFormat::Layout => {
            let source = if args.champion {
                champion_input(&input)
            } else {
                input
            };
            let mut layout = build_layout(&source, &config.layout)?;
            if args.start_round.is_some() || args.end_round.is_some() {
                layout = apply_window(&layout, args.start_round, args.end_round);
            }
            write_layout_dump(args.output.as_deref(), &layout, &source, config.output.pretty)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn apply_window(layout: &Layout, start: Option<usize>, end: Option<usize>) -> Layout {
    window_layout(layout, start.unwrap_or(0), end.unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{BracketInput, Match};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_window_flags() {
        let args = Args::try_parse_from([
            "bkl",
            "-g",
            "16",
            "--startRound",
            "1",
            "--endRound",
            "3",
            "-e",
            "layout",
        ])
        .unwrap();
        assert_eq!(args.generate, Some(16));
        assert_eq!(args.start_round, Some(1));
        assert_eq!(args.end_round, Some(3));
        assert_eq!(args.output_format, OutputFormat::Layout);
    }

    #[test]
    fn parses_partition_output_format() {
        let args = Args::try_parse_from(["bkl", "-i", "-", "-e", "partition", "--compact"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Partition);
        assert_eq!(args.input.as_deref(), Some(Path::new("-")));
        assert!(args.compact);
        assert!(!args.champion);
    }

    #[test]
    fn input_and_generate_conflict() {
        assert!(Args::try_parse_from(["bkl", "-i", "x.json", "-g", "8"]).is_err());
    }

    #[test]
    fn open_ended_window_keeps_later_rounds() {
        let input = single_elimination(8).unwrap();
        let layout = build_layout(&input, &LayoutConfig::default()).unwrap();
        let window = apply_window(&layout, Some(1), None);
        assert_eq!(window.rounds.len(), 2);
        assert_eq!(window.nodes.len(), 3);
    }

    #[test]
    fn champion_flag_drops_other_trees() {
        let input = BracketInput::new(vec![
            Match::feeding("A1", "AF"),
            Match::root("AF"),
            Match::feeding("B1", "BF"),
            Match::root("BF"),
        ]);
        let subset = champion_input(&input);
        let ids: Vec<&str> = subset.matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "AF"]);
    }
}
