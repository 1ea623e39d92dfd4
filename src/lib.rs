#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod generate;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod partition;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use generate::single_elimination;
pub use ir::{BracketInput, Match, MatchId, ParticipantRef};
pub use layout::{
    EdgeKind, Layout, LayoutEdge, LayoutError, LayoutNode, build_layout, window_layout,
};
pub use parser::parse_bracket;
pub use partition::{
    PartitionResult, PartitionSummary, WinnerTree, champion_input, partition_by_winner_trees,
};

/// Lays out only the championship tree of a possibly mixed bracket.
///
/// Runs the partitioner, keeps the champion tree's matches and builds their
/// layout. Input without a champion tree gives an empty layout.
pub fn layout_champion(input: &BracketInput, config: &LayoutConfig) -> layout::Result<Layout> {
    build_layout(&champion_input(input), config)
}
