use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{ListFormat, PlayerArgs};
use crate::error::AppResult;
use crate::playback::{counter_label, run_player, uses_terminal_ui};
use crate::scene::{SceneSequence, passport_to_nowhere};

enum RunPlan {
    List(ListFormat),
    Play(PlayerArgs),
}

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args(std::env::args_os())?;
    let config_path = apply_config(&mut args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color, uses_terminal_ui(&args));
    if let Some(path) = config_path {
        tracing::debug!("Using config file {}", path.display());
    }

    let scenes = passport_to_nowhere()?;
    match build_plan(args) {
        RunPlan::List(format) => {
            println!("{}", format_scene_list(&scenes, format)?);
            Ok(())
        }
        RunPlan::Play(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_player(&args, scenes))
        }
    }
}

fn parse_args<I>(raw_args: I) -> AppResult<(PlayerArgs, ArgMatches)>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = PlayerArgs::command().get_matches_from(raw_args);
    let args = PlayerArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

/// Layers the config file under the CLI values and returns its path.
fn apply_config(args: &mut PlayerArgs, matches: &ArgMatches) -> AppResult<Option<PathBuf>> {
    match crate::config::load_config(args.config.as_deref())? {
        Some(loaded) => {
            crate::config::apply_config(args, matches, &loaded.file)?;
            Ok(Some(loaded.path))
        }
        None => Ok(None),
    }
}

fn build_plan(args: PlayerArgs) -> RunPlan {
    if args.list {
        return RunPlan::List(args.list_format);
    }
    RunPlan::Play(args)
}

fn format_scene_list(scenes: &SceneSequence, format: ListFormat) -> AppResult<String> {
    match format {
        ListFormat::Json => {
            let all: Vec<_> = scenes.iter().collect();
            Ok(serde_json::to_string_pretty(&all)?)
        }
        ListFormat::Text => {
            let len = scenes.len();
            let rows: Vec<String> = scenes
                .iter()
                .enumerate()
                .map(|(index, scene)| {
                    format!(
                        "{}  {:<12} {:>6} ms  {}",
                        counter_label(index, len),
                        scene.id,
                        scene.duration_ms,
                        scene.location
                    )
                })
                .collect();
            Ok(rows.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn text_list_has_one_row_per_scene() -> AppResult<()> {
        let scenes = passport_to_nowhere()?;
        let listing = format_scene_list(&scenes, ListFormat::Text)?;
        let rows: Vec<&str> = listing.lines().collect();
        if rows.len() != 5 {
            return Err(AppError::validation(format!(
                "Expected 5 rows, got {}",
                rows.len()
            )));
        }
        match rows.first() {
            Some(row) if row.starts_with("01 / 05  porch-intro") && row.contains("6500 ms") => {}
            Some(row) => {
                return Err(AppError::validation(format!("Unexpected first row: {}", row)));
            }
            None => return Err(AppError::validation("Missing first row")),
        }
        Ok(())
    }

    #[test]
    fn json_list_round_trips_ids() -> AppResult<()> {
        let scenes = passport_to_nowhere()?;
        let listing = format_scene_list(&scenes, ListFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&listing)?;
        let ids: Vec<&str> = value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("id").and_then(serde_json::Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        if ids != ["porch-intro", "beach", "mountains", "city", "porch-outro"] {
            return Err(AppError::validation(format!("Unexpected ids: {:?}", ids)));
        }
        Ok(())
    }

    #[test]
    fn apply_config_reports_loaded_path() -> AppResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("player.toml");
        std::fs::write(&path, "speed = 3\n")?;

        let (mut args, matches) = parse_args(
            [OsString::from("storyreel"), OsString::from("--config"), path.clone().into_os_string()]
                .into_iter(),
        )?;
        let loaded = apply_config(&mut args, &matches)?;
        if loaded.as_deref() != Some(path.as_path()) {
            return Err(AppError::validation(format!(
                "Expected config path to be reported, got {:?}",
                loaded
            )));
        }
        if args.speed.get() != 3 {
            return Err(AppError::validation("Expected config speed to apply"));
        }
        Ok(())
    }

    #[test]
    fn list_flag_selects_list_plan() -> AppResult<()> {
        let (args, _) = parse_args(
            ["storyreel", "--list", "--list-format", "json"]
                .into_iter()
                .map(OsString::from),
        )?;
        match build_plan(args) {
            RunPlan::List(ListFormat::Json) => Ok(()),
            RunPlan::List(ListFormat::Text) | RunPlan::Play(_) => {
                Err(AppError::validation("Expected json list plan"))
            }
        }
    }
}
