// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

//! This module has the function that called by the main function.

use std::{
    io,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{debug, info};
use thiserror::Error;

use crate::{
    album_converter::{self, UnitOutcome},
    conversion_error::ConversionError,
    directory_resolver,
    element::{ffmpeg::FfmpegAlacConverter, AlacConverter},
    environment::{Environment, Platform, SystemEnvironment, ToolStatus},
};

/// The struct for setting.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Convert FLAC files to ALAC (M4A) files with FFmpeg."
)]
pub struct Setting {
    #[arg(
        value_name = "TARGET_DIRECTORY",
        help = "An album directory, or a library directory that contains album directories. \
                Defaults to the directory of this executable."
    )]
    target_directory: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Continue with the other files when a file cannot be converted."
    )]
    keep_going: bool,
}

/// A directory that conversion was attempted on.
#[derive(Debug)]
pub struct ProcessedUnit {
    pub directory: PathBuf,
    pub outcome: UnitOutcome,
}

/// Error of flac_to_alac.
#[derive(Error, Debug)]
pub enum FlacToAlacError {
    #[error("Your OS ({0}) is not supported.")]
    UnsupportedPlatform(String),

    #[error("Target directory {0:?} does not exist.")]
    TargetDirectoryNotFound(PathBuf),

    #[error("Target directory cannot be determined: {0}")]
    TargetDirectoryUnresolvable(io::Error),

    #[error("FFmpeg is {0}. Download FFmpeg or make sure it's in the PATH!")]
    ToolNotInstalled(ToolStatus),

    #[error("Could not find FFmpeg in PATH or binary does not have rights!")]
    ToolNotLocated,

    #[error("Conversion is failed: {0}")]
    ConversionError(ConversionError),

    #[error("{0} files could not be converted.")]
    FilesFailed(usize),
}

impl FlacToAlacError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlacToAlacError::UnsupportedPlatform(_) => 1,
            FlacToAlacError::TargetDirectoryNotFound(_)
            | FlacToAlacError::TargetDirectoryUnresolvable(_) => 2,
            FlacToAlacError::ToolNotInstalled(_) | FlacToAlacError::ToolNotLocated => 3,
            FlacToAlacError::ConversionError(_) | FlacToAlacError::FilesFailed(_) => 4,
        }
    }
}

fn locate_ffmpeg<E: Environment + ?Sized>(
    environment: &E,
    platform: Platform,
) -> Result<PathBuf, FlacToAlacError> {
    let status = environment.probe_tool();
    if !status.is_installed() {
        return Err(FlacToAlacError::ToolNotInstalled(status));
    }

    environment
        .locate_tool(platform)
        .ok_or(FlacToAlacError::ToolNotLocated)
}

fn resolve_target_directory(setting: &Setting) -> Result<PathBuf, FlacToAlacError> {
    let target_directory =
        directory_resolver::resolve_target_directory(setting.target_directory.as_deref())
            .map_err(FlacToAlacError::TargetDirectoryUnresolvable)?;

    if directory_resolver::exists(&target_directory) {
        Ok(target_directory)
    } else {
        Err(FlacToAlacError::TargetDirectoryNotFound(target_directory))
    }
}

/// Converts FLAC files with the given host and converter.
///
/// The platform is checked first, then the target directory, then FFmpeg.
/// Nothing is written before all of them pass. `create_converter` receives
/// the located FFmpeg path.
pub fn flac_to_alac_in_environment<E, F>(
    setting: &Setting,
    environment: &E,
    create_converter: F,
) -> Result<Vec<ProcessedUnit>, FlacToAlacError>
where
    E: Environment + ?Sized,
    F: FnOnce(&Path) -> Box<dyn AlacConverter>,
{
    let platform = environment
        .detect_platform()
        .map_err(FlacToAlacError::UnsupportedPlatform)?;

    debug!("Platform: {platform}");

    let target_directory = resolve_target_directory(setting)?;

    debug!("Target directory: {target_directory:?}");

    let ffmpeg_path = locate_ffmpeg(environment, platform)?;

    debug!("FFmpeg: {ffmpeg_path:?}");

    let converter = create_converter(&ffmpeg_path);

    let units = directory_resolver::enumerate_units(&target_directory)
        .map_err(|error| FlacToAlacError::ConversionError(error.into()))?;

    debug!("Directories to convert: {units:?}");

    let mut processed_units = Vec::with_capacity(units.len());

    for unit in units {
        let outcome = album_converter::process_unit(&unit, converter.as_ref(), setting.keep_going)
            .map_err(FlacToAlacError::ConversionError)?;

        processed_units.push(ProcessedUnit {
            directory: unit,
            outcome,
        });
    }

    let failed_count: usize = processed_units
        .iter()
        .map(|unit| unit.outcome.failed_files.len())
        .sum();

    if failed_count > 0 {
        return Err(FlacToAlacError::FilesFailed(failed_count));
    }

    info!("All files were processed!");

    Ok(processed_units)
}

/// Converts FLAC files to ALAC files.
///
/// FLAC files in the target directory, or in each of its subdirectories, are
/// converted by FFmpeg into an `alac` directory next to them.
pub fn flac_to_alac(setting: &Setting) -> Result<Vec<ProcessedUnit>, FlacToAlacError> {
    flac_to_alac_in_environment(setting, &SystemEnvironment, |ffmpeg_path| {
        Box::new(FfmpegAlacConverter::new(ffmpeg_path))
    })
}
