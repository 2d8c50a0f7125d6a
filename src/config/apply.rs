use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PlayerArgs, PositiveU64};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not given on the
/// command line.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut PlayerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "no_ui")
        && let Some(no_tui) = config.no_tui
    {
        args.no_ui = no_tui;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if !is_cli(matches, "no_splash")
        && let Some(no_splash) = config.no_splash
    {
        args.no_splash = no_splash;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "speed")
        && let Some(speed) = config.speed
    {
        args.speed = ensure_positive_u64(speed, "speed")?;
    }

    if !is_cli(matches, "fps")
        && let Some(fps) = config.fps
    {
        args.fps = ensure_positive_u64(fps, "fps")?;
    }

    if !is_cli(matches, "replays")
        && let Some(replays) = config.replays
    {
        args.replays = replays;
    }

    if !is_cli(matches, "exit_on_finish")
        && let Some(exit_on_finish) = config.exit_on_finish
    {
        args.exit_on_finish = exit_on_finish;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
