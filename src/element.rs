// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

pub mod ffmpeg;

use std::path::Path;

use crate::conversion_error::ConversionError;

#[cfg_attr(test, mockall::automock)]
pub trait AlacConverter {
    /// Converts `source_file` into an ALAC file at `destination_file`.
    fn convert(&self, source_file: &Path, destination_file: &Path) -> Result<(), ConversionError>;
}
