//! Terminal presentation of the current scene, progress and replay control.
pub mod model;
pub mod render;

#[cfg(test)]
mod tests;
