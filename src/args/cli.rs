use clap::Parser;

use super::parsers::{parse_bool_env, parse_positive_u64};
use super::types::{ListFormat, PositiveU64};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Terminal slideshow player - timed scene playback with animated progress, dialogue reveals, and instant replay."
)]
pub struct PlayerArgs {
    /// Print the scene list and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Output format for --list
    #[arg(long = "list-format", default_value = "text", value_enum)]
    pub list_format: ListFormat,

    /// Disable the terminal UI and print scenes as plain text
    #[arg(long = "no-tui", alias = "no-ui")]
    pub no_ui: bool,

    /// Skip the title card shown before playback
    #[arg(long = "no-splash")]
    pub no_splash: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Playback speed multiplier applied to every scene duration
    #[arg(long = "speed", default_value = "1", value_parser = parse_positive_u64)]
    pub speed: PositiveU64,

    /// Frames per second for the UI
    #[arg(long = "fps", default_value = "20", value_parser = parse_positive_u64)]
    pub fps: PositiveU64,

    /// Extra playthroughs after the story ends (plain-text mode only)
    #[arg(long = "replays", default_value = "0")]
    pub replays: u32,

    /// Quit as soon as the last scene ends instead of waiting for replay
    #[arg(long = "exit-on-finish")]
    pub exit_on_finish: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by STORYREEL_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./storyreel.toml or ./storyreel.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
