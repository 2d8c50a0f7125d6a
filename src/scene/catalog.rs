use crate::error::ValidationError;

use super::types::{Scene, SceneSequence};

pub const STORY_TITLE: &str = "Passport to Nowhere";
pub const STORY_KICKER: &str = "A porch-side short story";

/// The built-in story, validated on construction.
///
/// # Errors
///
/// Returns an error if the compiled-in scene table violates a sequence
/// invariant.
pub fn passport_to_nowhere() -> Result<SceneSequence, ValidationError> {
    SceneSequence::new(vec![
        Scene::new(
            "porch-intro",
            6500,
            "scene-porch",
            "Blue Ridge porch • Sunrise haze",
            "The old man rocks slowly, eyes steady, a smirk hinting at the punchline he has lived.",
        )
        .with_man_line("\"Going with wife on vacation... is just a change of location.\"")
        .with_tone("sage"),
        Scene::new(
            "beach",
            5200,
            "scene-beach",
            "Tropical shoreline • Midday glare",
            "Palms sway, but her commands keep the waves in formation as he balances the beach bag.",
        )
        .with_wife_lines(&[
            "\"Hold the umbrella straight! It's crooked!\"",
            "\"Did you double-check the sunscreen times?\"",
        ])
        .with_tone("directive"),
        Scene::new(
            "mountains",
            5200,
            "scene-mountain",
            "Highland overlook • Thin mountain air",
            "The horizon stretches, yet the itinerary grows longer with every breathless step.",
        )
        .with_wife_lines(&[
            "\"You're walking too slow—this is the leisurely trail!\"",
            "\"Map says turn left; why aren't we already there?\"",
        ])
        .with_tone("urgent"),
        Scene::new(
            "city",
            5200,
            "scene-city",
            "Urban lights • Evening rush",
            "Skyscrapers glitter, but her schedule outshines every marquee in town.",
        )
        .with_wife_lines(&[
            "\"No, not that café—check the list!\"",
            "\"Tickets go on sale in two minutes; refresh again!\"",
        ])
        .with_tone("meticulous"),
        Scene::new(
            "porch-outro",
            6400,
            "scene-porch-night",
            "Same porch • Fireflies returning",
            "The rocking chair welcomes him home; the only itinerary now is the rhythm of the crickets.",
        )
        .with_man_line("\"Home sweet home.\"")
        .with_tone("relief"),
    ])
}
