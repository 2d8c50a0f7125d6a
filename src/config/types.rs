use std::path::PathBuf;

use serde::Deserialize;

/// Player options read from `storyreel.toml` / `storyreel.json`. Values set
/// on the command line take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "no_ui")]
    pub no_tui: Option<bool>,
    pub no_color: Option<bool>,
    pub no_splash: Option<bool>,
    pub verbose: Option<bool>,
    pub speed: Option<u64>,
    pub fps: Option<u64>,
    pub replays: Option<u32>,
    pub exit_on_finish: Option<bool>,
}

/// A parsed config file and where it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub file: ConfigFile,
}
