#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let scene_count = usize::from(count % 12).saturating_add(1);
    let durations: Vec<u64> = (1..=scene_count)
        .map(|step| u64::try_from(step).unwrap_or(1).saturating_mul(250))
        .collect();

    let result = storyreel::fuzzing::run_playback_ops(&durations, rest);
    debug_assert!(result.is_ok(), "{:?}", result);
    if let Ok(state) = result {
        debug_assert!(state.index < scene_count);
    }
});
