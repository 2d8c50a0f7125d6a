use clap::Parser;

use crate::error::{AppError, AppResult};

use super::PlayerArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<PlayerArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    PlayerArgs::try_parse_from(args).map_err(AppError::from)
}
