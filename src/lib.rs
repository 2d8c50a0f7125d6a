//! Core library for the `storyreel` CLI.
//!
//! This crate provides the building blocks used by the binary: the scene
//! catalog, the playback state machine and its timer, CLI argument types,
//! configuration parsing, the terminal renderer, and the player loops
//! (`playback::run_player`, `playback::run_headless`). The primary user-facing
//! interface is the `storyreel` command-line application; library APIs may
//! evolve as the player grows.
pub mod args;
pub mod config;
pub mod error;
pub mod playback;
pub mod scene;
pub mod shutdown;
pub mod ui;

mod shutdown_handlers;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
