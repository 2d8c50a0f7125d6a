mod args;
mod config;
mod entry;
mod error;
mod logger;
mod playback;
mod scene;
mod shutdown;
mod shutdown_handlers;
mod ui;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
