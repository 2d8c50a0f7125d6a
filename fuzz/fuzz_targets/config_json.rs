#![no_main]

use libfuzzer_sys::fuzz_target;
use storyreel::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    let applied = storyreel::fuzzing::apply_config_from_json(data);
    if applied.is_ok() {
        if let Some(config) = parsed {
            debug_assert!(config.speed != Some(0));
            debug_assert!(config.fps != Some(0));
        }
    }
});
