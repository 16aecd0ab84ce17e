// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

//! A module for FFmpeg.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{conversion_error::ConversionError, environment::FFMPEG_COMMAND, process_invoker};

use super::AlacConverter;

/// Bitrate passed along with the ALAC codec. ALAC ignores it.
const AUDIO_BITRATE: &str = "32k";

/// Arguments that convert `source_file` to an audio only, fast start M4A file.
///
/// An existing `destination_file` is overwritten.
pub fn alac_arguments(source_file: &Path, destination_file: &Path) -> Vec<OsString> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        source_file.into(),
        "-c:a".into(),
        "alac".into(),
        "-vn".into(),
        "-b:a".into(),
        AUDIO_BITRATE.into(),
        "-movflags".into(),
        "+faststart".into(),
        destination_file.into(),
    ]
}

/// Converts with the FFmpeg binary found on the host.
pub struct FfmpegAlacConverter {
    ffmpeg_path: PathBuf,
}

impl FfmpegAlacConverter {
    pub fn new<P: AsRef<Path>>(ffmpeg_path: P) -> Self {
        FfmpegAlacConverter {
            ffmpeg_path: ffmpeg_path.as_ref().to_path_buf(),
        }
    }
}

impl AlacConverter for FfmpegAlacConverter {
    fn convert(&self, source_file: &Path, destination_file: &Path) -> Result<(), ConversionError> {
        let arguments = alac_arguments(source_file, destination_file);

        debug!("{:?} {arguments:?}", self.ffmpeg_path);

        let mut ffmpeg = process_invoker::hidden_command(&self.ffmpeg_path);
        let command = ffmpeg.args(&arguments);

        process_invoker::run_command(command, FFMPEG_COMMAND)
    }
}
